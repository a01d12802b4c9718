use crate::areas::index::StagingIndex;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::commit_ref::CommitRef;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    /// Switch the working directory and HEAD to another branch.
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| TwigError::NoSuchBranch(branch_name.to_string()))?;
        let target_id = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| TwigError::NoSuchBranch(branch_name.to_string()))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::AlreadyOnBranch(branch_name.to_string()).into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        self.reclassify(&mut index)?;

        self.switch_snapshot(&mut index, &target_id)?;
        self.refs().set_current_branch(&branch_name)?;

        index.write_updates()?;

        Ok(())
    }

    /// Restore one file from the current commit.
    pub async fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        let (_, commit) = self.current_commit()?;
        self.restore_file(&commit, file).await
    }

    /// Restore one file from any commit.
    pub async fn checkout_commit_file(&mut self, commit_ref: &str, file: &str) -> anyhow::Result<()> {
        let commit_id = CommitRef::try_parse(commit_ref)?.resolve(self.database(), self.refs())?;
        let commit = self.database().parse_object_as_commit(&commit_id)?;

        self.restore_file(&commit, file).await
    }

    /// Move the current branch to another commit and check it out.
    pub async fn reset(&mut self, commit_ref: &str) -> anyhow::Result<()> {
        let target_id = CommitRef::try_parse(commit_ref)?.resolve(self.database(), self.refs())?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        self.reclassify(&mut index)?;

        self.switch_snapshot(&mut index, &target_id)?;
        self.refs().update_head(&target_id)?;

        index.write_updates()?;

        Ok(())
    }

    /// Replace the current commit's files in the working directory with the
    /// target commit's, then make the target the new baseline.
    ///
    /// Fails before touching anything if an untracked file is in the way.
    pub(crate) fn switch_snapshot(
        &self,
        index: &mut StagingIndex,
        target_id: &ObjectId,
    ) -> anyhow::Result<()> {
        let (_, current) = self.current_commit()?;
        let target = self.database().parse_object_as_commit(target_id)?;

        let migration = Migration::between(current.snapshot(), target.snapshot());
        migration.ensure_no_untracked_conflicts(index, self.workspace())?;

        self.workspace().apply_migration(&migration, self.database())?;

        self.database().clear_staged()?;
        index.reset_baseline(target.snapshot());

        Ok(())
    }

    async fn restore_file(&mut self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(Path::new(file))?;
        let blob_id = commit
            .blob_oid(&path)
            .cloned()
            .ok_or_else(|| TwigError::FileNotInCommit(path.clone()))?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let migration = Migration::single_file(path.clone(), blob_id);
        migration.ensure_no_untracked_conflicts(&index, self.workspace())?;
        self.workspace().apply_migration(&migration, self.database())?;

        if let Some(staged_id) = index.unstage_add(&path) {
            self.database().discard_staged(&staged_id)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
