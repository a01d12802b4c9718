use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::commands::porcelain::merge::MergeOutcome;
use crate::commands::remote::transfer_history;
use crate::errors::TwigError;

impl Repository {
    /// Copy `branch` of `remote` into the local branch `<remote>/<branch>`.
    pub async fn fetch(&mut self, remote: &str, branch: &str) -> anyhow::Result<BranchName> {
        let remote_store = self.open_remote(remote)?;
        let branch_name = BranchName::try_parse(branch.to_string())
            .map_err(|_| TwigError::UnknownRemoteBranch(branch.to_string()))?;
        let remote_tip = remote_store
            .refs
            .read_branch(&branch_name)?
            .ok_or_else(|| TwigError::UnknownRemoteBranch(branch.to_string()))?;

        transfer_history(&remote_store.database, self.database(), &remote_tip)?;

        let tracking_branch = BranchName::remote_tracking(remote, &branch_name)?;
        self.refs().update_branch(&tracking_branch, &remote_tip)?;

        Ok(tracking_branch)
    }

    /// Fetch, then merge the fetched branch into the current one.
    pub async fn pull(&mut self, remote: &str, branch: &str) -> anyhow::Result<MergeOutcome> {
        let tracking_branch = self.fetch(remote, branch).await?;
        self.merge(tracking_branch.as_ref()).await
    }
}
