use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::shadow::Shadow;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    /// Print branches and staging state. Nothing is written back.
    pub async fn status(&mut self) -> anyhow::Result<StatusInfo> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let working_files = self.workspace().working_snapshot()?;
        let shadow = Shadow::load(&self.shadow_path())?;
        let inspector = Inspector::new(&index, &working_files, &shadow);

        let status = StatusInfo::collect(
            &inspector,
            self.refs().current_branch()?,
            self.refs().list_branches()?,
        );
        status.print(&mut *self.writer())?;

        Ok(status)
    }
}
