use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.database().staged_path())
            .context("Failed to create .twig/staged-objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        fs::create_dir_all(self.remotes().path())
            .context("Failed to create .twig/remotes directory")?;

        let root_oid = self.database().store(&Commit::root())?;
        let default_branch = BranchName::default_branch();
        self.refs()
            .update_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.reset_baseline(&Snapshot::new());
        index.write_updates()?;

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.twig_path().display()
        )?;

        Ok(())
    }
}
