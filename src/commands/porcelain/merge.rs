use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::ensure_no_untracked_conflicts;
use crate::artifacts::merge::conflict::conflict_blob;
use crate::artifacts::merge::resolution::{Resolution, resolve_all};
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch is already part of the current history
    AlreadyMerged,
    /// The current branch was moved to the other branch's tip
    FastForward(ObjectId),
    /// A merge commit was written, possibly with conflict markers in `conflicts`
    Merged {
        commit: ObjectId,
        conflicts: Vec<PathBuf>,
    },
}

impl Repository {
    pub async fn merge(&mut self, other: &str) -> anyhow::Result<MergeOutcome> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.has_staged_changes() {
            return Err(TwigError::UncommittedChanges.into());
        }

        let other_branch = BranchName::try_parse(other.to_string())
            .map_err(|_| TwigError::BranchNotFound(other.to_string()))?;
        let other_id = self
            .refs()
            .read_branch(&other_branch)?
            .ok_or_else(|| TwigError::BranchNotFound(other.to_string()))?;

        let current_branch = self.refs().current_branch()?;
        if current_branch == other_branch {
            return Err(TwigError::SelfMerge.into());
        }

        let (head_id, head) = self.current_commit()?;
        let split_id = self.split_point(&head_id, &other_id)?;

        if split_id.as_ref() == Some(&other_id) {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AlreadyMerged);
        }

        if split_id.as_ref() == Some(&head_id) {
            self.reclassify(&mut index)?;
            self.switch_snapshot(&mut index, &other_id)?;
            self.refs().update_head(&other_id)?;
            index.write_updates()?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForward(other_id));
        }

        let other_commit = self.database().parse_object_as_commit(&other_id)?;
        let split_snapshot = match &split_id {
            Some(split_id) => self
                .database()
                .parse_object_as_commit(split_id)?
                .snapshot()
                .clone(),
            None => Snapshot::new(),
        };

        let resolutions = resolve_all(&split_snapshot, head.snapshot(), other_commit.snapshot());

        self.reclassify(&mut index)?;
        ensure_no_untracked_conflicts(resolutions.keys(), &index, self.workspace())?;

        let mut conflicts = Vec::new();
        for (path, resolution) in resolutions {
            match resolution {
                Resolution::KeepCurrent => {}
                Resolution::TakeOther(blob_id) => {
                    let blob = self.database().parse_object_as_blob(&blob_id)?;
                    self.workspace().write_file(&path, blob.content())?;
                    index.stage_add(&path, blob_id);
                }
                Resolution::Remove => {
                    self.workspace().remove_file(&path)?;
                    index.stage_removal(&path, head.blob_oid(&path).cloned());
                }
                Resolution::Conflict { current, other } => {
                    let current = current
                        .map(|blob_id| self.database().parse_object_as_blob(&blob_id))
                        .transpose()?;
                    let other = other
                        .map(|blob_id| self.database().parse_object_as_blob(&blob_id))
                        .transpose()?;

                    let blob = conflict_blob(&path, current.as_ref(), other.as_ref());
                    let blob_id = self.database().store_staged(&blob)?;
                    self.workspace().write_file(&path, blob.content())?;
                    index.stage_add(&path, blob_id);

                    conflicts.push(path);
                }
            }
        }

        let message = format!("Merged {other_branch} into {current_branch}.");
        let commit_id = self.write_commit(&mut index, &message, Some(other_id))?;
        index.write_updates()?;

        if !conflicts.is_empty() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_id,
            conflicts,
        })
    }
}
