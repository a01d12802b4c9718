use crate::areas::index::StagingIndex;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::shadow::Shadow;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Compares the staging index with the working directory without touching
/// either of them.
#[derive(new)]
pub struct Inspector<'s> {
    index: &'s StagingIndex,
    /// Current working files mapped to the blob id of their content
    working_files: &'s Snapshot,
    shadow: &'s Shadow,
}

impl<'s> Inspector<'s> {
    pub fn staged(&self) -> BTreeSet<PathBuf> {
        self.index.staged_adds().keys().cloned().collect()
    }

    pub fn removed(&self) -> BTreeSet<PathBuf> {
        self.index.staged_removes().keys().cloned().collect()
    }

    pub fn workspace_changes(&self) -> BTreeMap<PathBuf, WorkspaceChangeType> {
        let tracked_changes = self
            .index
            .tracked()
            .iter()
            .filter(|(path, _)| {
                !self.index.staged_adds().contains_key(*path)
                    && !self.index.is_staged_for_removal(path)
            })
            .filter_map(|(path, tracked_oid)| match self.working_files.get(path) {
                None => Some((path.clone(), WorkspaceChangeType::Deleted)),
                Some(working_oid) if working_oid != tracked_oid => {
                    Some((path.clone(), WorkspaceChangeType::Modified))
                }
                Some(_) => None,
            });

        let staged_changes = self
            .index
            .staged_adds()
            .iter()
            .filter_map(|(path, staged_oid)| match self.working_files.get(path) {
                None => Some((path.clone(), WorkspaceChangeType::Deleted)),
                Some(working_oid) if working_oid != staged_oid => {
                    Some((path.clone(), WorkspaceChangeType::Modified))
                }
                Some(_) => None,
            });

        tracked_changes.chain(staged_changes).collect()
    }

    pub fn untracked(&self) -> BTreeSet<PathBuf> {
        self.working_files
            .keys()
            .filter(|path| {
                self.index.is_staged_for_removal(path)
                    || (!self.index.is_tracked(path)
                        && !self.index.staged_adds().contains_key(*path))
            })
            .cloned()
            .collect()
    }

    /// Paths whose state changed since the shadow snapshot was taken.
    pub fn recent(&self) -> BTreeSet<PathBuf> {
        let just_added = self
            .untracked()
            .into_iter()
            .filter(|path| !self.shadow.contains(path));

        let just_deleted = self
            .index
            .tracked()
            .keys()
            .filter(|path| {
                !self.working_files.contains_key(*path)
                    && self.shadow.contains(path)
                    && !self.index.is_staged_for_removal(path)
            })
            .cloned();

        let just_modified = self
            .index
            .tracked()
            .iter()
            .filter(|(path, _)| !self.index.staged_adds().contains_key(*path))
            .filter(|(path, tracked_oid)| {
                self.working_files.get(*path).is_some_and(|working_oid| {
                    working_oid != *tracked_oid
                        && self
                            .shadow
                            .get(path)
                            .is_some_and(|shadow_oid| shadow_oid != working_oid)
                })
            })
            .map(|(path, _)| path.clone());

        just_added.chain(just_deleted).chain(just_modified).collect()
    }
}
