use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::commands::remote::transfer_history;
use crate::errors::TwigError;

impl Repository {
    /// Send the current history to `branch` on `remote`.
    ///
    /// Only the remote's objects and branch ref change; its working directory
    /// and staging index are left alone.
    pub async fn push(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let remote_store = self.open_remote(remote)?;
        let branch_name = BranchName::try_parse(branch.to_string())?;
        let head_id = self.refs().read_head()?;

        if let Some(remote_tip) = remote_store.refs.read_branch(&branch_name)?
            && !self.ancestry_contains(&remote_tip)?
        {
            return Err(TwigError::DivergedHistory.into());
        }

        transfer_history(self.database(), &remote_store.database, &head_id)?;
        remote_store.refs.update_branch(&branch_name, &head_id)?;

        Ok(())
    }
}
