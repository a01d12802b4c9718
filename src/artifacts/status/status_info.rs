use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged: FileSet,
    pub(crate) removed: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked: FileSet,
    /// Paths that changed since the previous command
    pub(crate) recent: FileSet,
}

impl StatusInfo {
    pub fn collect(
        inspector: &Inspector<'_>,
        current_branch: BranchName,
        branches: Vec<BranchName>,
    ) -> Self {
        StatusInfo {
            current_branch,
            branches,
            staged: inspector.staged(),
            removed: inspector.removed(),
            workspace_changeset: inspector.workspace_changes(),
            untracked: inspector.untracked(),
            recent: inspector.recent(),
        }
    }

    pub fn recent(&self) -> &FileSet {
        &self.recent
    }

    pub fn print(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        writeln!(writer, "{}", format!("*{}", self.current_branch).green())?;
        for branch in self.branches.iter().filter(|b| **b != self.current_branch) {
            writeln!(writer, "{branch}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &self.staged {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &self.removed {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(writer, "{} {}", self.highlight(path), change)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &self.untracked {
            writeln!(writer, "{}", self.highlight(path))?;
        }
        writeln!(writer)?;

        Ok(())
    }

    fn highlight(&self, path: &Path) -> String {
        let name = path.display().to_string();
        if self.recent.contains(path) {
            name.bold().to_string()
        } else {
            name
        }
    }
}
