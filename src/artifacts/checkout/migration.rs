//! Working directory migration between two snapshots
//!
//! Switching branches or resetting replaces the working directory's tracked
//! files with another commit's snapshot:
//!
//! 1. Files tracked by the current snapshot but absent from the target are deleted
//! 2. Every file of the target snapshot is written out
//!
//! Everything is planned first. Before anything touches the disk the plan is
//! checked against the staging index so that files present in the working
//! directory but not tracked are never overwritten or deleted.

use crate::areas::index::StagingIndex;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    /// Files to delete from the working directory
    deletions: BTreeSet<PathBuf>,
    /// Files to write, with the blob holding their content
    writes: BTreeMap<PathBuf, ObjectId>,
}

impl Migration {
    /// Plan the move from `current` to `target`.
    pub fn between(current: &Snapshot, target: &Snapshot) -> Self {
        let deletions = current
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect();

        Migration {
            deletions,
            writes: target.clone(),
        }
    }

    /// Plan restoring a single file.
    pub fn single_file(path: PathBuf, oid: ObjectId) -> Self {
        Migration {
            deletions: BTreeSet::new(),
            writes: BTreeMap::from([(path, oid)]),
        }
    }

    pub fn deletions(&self) -> &BTreeSet<PathBuf> {
        &self.deletions
    }

    pub fn writes(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.writes
    }

    pub fn touched_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.deletions.iter().chain(self.writes.keys())
    }

    /// Fail if applying this plan would clobber a file that is not tracked.
    pub fn ensure_no_untracked_conflicts(
        &self,
        index: &StagingIndex,
        workspace: &Workspace,
    ) -> anyhow::Result<()> {
        ensure_no_untracked_conflicts(self.touched_paths(), index, workspace)
    }
}

/// The data-loss guard shared by checkout, reset and merge.
///
/// A path is in the way when it exists in the working directory while the
/// tracked baseline does not know it.
pub fn ensure_no_untracked_conflicts<'p>(
    paths: impl IntoIterator<Item = &'p PathBuf>,
    index: &StagingIndex,
    workspace: &Workspace,
) -> anyhow::Result<()> {
    let conflicts = paths
        .into_iter()
        .filter(|path| is_untracked_and_present(path, index, workspace))
        .cloned()
        .collect::<BTreeSet<_>>();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(TwigError::UntrackedFileConflict(conflicts.into_iter().collect()).into())
    }
}

fn is_untracked_and_present(path: &Path, index: &StagingIndex, workspace: &Workspace) -> bool {
    !index.is_tracked(path) && workspace.contains(path)
}
