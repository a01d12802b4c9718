use crate::areas::index::StagingIndex;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let commit_id = self.write_commit(&mut index, message, None)?;
        index.write_updates()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit_id.to_short_oid(),
            message
        )?;

        Ok(commit_id)
    }

    /// Record the staged changes on top of the current commit.
    ///
    /// The new snapshot is the parent's with staged additions applied first and
    /// staged removals second. Merge commits (with a `second_parent`) are
    /// written even when nothing is staged.
    pub(crate) fn write_commit(
        &self,
        index: &mut StagingIndex,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if second_parent.is_none() && !index.has_staged_changes() {
            return Err(TwigError::NothingToCommit.into());
        }

        let (parent_id, parent) = self.current_commit()?;

        let mut snapshot = parent.snapshot().clone();
        for (path, blob_id) in index.staged_adds() {
            snapshot.insert(path.clone(), blob_id.clone());
        }
        for path in index.staged_removes().keys() {
            snapshot.remove(path);
        }

        // blobs must be durable before a commit references them
        for blob_id in index.staged_adds().values() {
            self.database().promote(blob_id)?;
        }

        let commit = Commit::new(
            Commit::timestamp_from_env(),
            message.to_string(),
            Some(parent_id),
            second_parent,
            snapshot,
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        index.reset_baseline(commit.snapshot());

        Ok(commit_id)
    }
}
