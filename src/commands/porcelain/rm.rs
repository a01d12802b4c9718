use crate::areas::repository::Repository;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// A tracked file was deleted and its removal staged
    StagedRemoval,
    /// A staged addition was undone
    Unstaged,
    /// The file was neither tracked nor staged
    NothingToRemove,
}

impl Repository {
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<RemoveOutcome> {
        let path = self.workspace().relative_path(Path::new(file))?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let outcome = if let Some(tracked_id) = index.tracked_oid(&path).cloned() {
            if let Some(staged_id) = index.unstage_add(&path) {
                self.database().discard_staged(&staged_id)?;
            }
            index.stage_removal(&path, Some(tracked_id));
            self.workspace().remove_file(&path)?;

            RemoveOutcome::StagedRemoval
        } else if let Some(staged_id) = index.unstage_add(&path) {
            self.database().discard_staged(&staged_id)?;
            if self.workspace().contains(&path) {
                index.mark_untracked(&path);
            } else {
                index.stage_removal(&path, None);
            }

            RemoveOutcome::Unstaged
        } else {
            writeln!(self.writer(), "No reason to remove the file.")?;
            return Ok(RemoveOutcome::NothingToRemove);
        };

        index.write_updates()?;

        Ok(outcome)
    }
}
