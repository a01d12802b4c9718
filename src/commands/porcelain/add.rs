use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(Path::new(file))?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if !self.workspace().contains(&path) {
            return Err(TwigError::FileNotFound(path).into());
        }

        if index.restore_removal(&path) {
            index.write_updates()?;
            return Ok(());
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;

        if index.tracked_oid(&path) == Some(&blob_id) {
            // back to the committed version: nothing left to stage
            if let Some(staged_id) = index.unstage_add(&path) {
                self.database().discard_staged(&staged_id)?;
            }
            index.clear_marks(&path);
        } else {
            self.database().store_staged(&blob)?;
            if let Some(replaced_id) = index.stage_add(&path, blob_id) {
                self.database().discard_staged(&replaced_id)?;
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
