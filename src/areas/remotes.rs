//! Named remotes
//!
//! Each remote is a file `remotes/<name>` holding the path to the remote
//! repository's `.twig` directory.

use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the remotes directory (typically `.twig/remotes`)
    path: Box<Path>,
}

impl Remotes {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, name: &str) -> bool {
        self.remote_path(name).is_file()
    }

    pub fn add(&self, name: &str, location: &Path) -> anyhow::Result<()> {
        Self::validate_name(name)?;
        if self.exists(name) {
            return Err(TwigError::RemoteAlreadyExists(name.to_string()).into());
        }

        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("failed to create remotes directory at {:?}", self.path))?;
        std::fs::write(self.remote_path(name), location.to_string_lossy().as_bytes())
            .with_context(|| format!("failed to record remote {name}"))
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        if !self.exists(name) {
            return Err(TwigError::RemoteNotFound(name.to_string()).into());
        }

        std::fs::remove_file(self.remote_path(name))
            .with_context(|| format!("failed to delete remote {name}"))
    }

    /// Where the remote's `.twig` directory lives.
    pub fn location(&self, name: &str) -> anyhow::Result<PathBuf> {
        if !self.exists(name) {
            return Err(TwigError::RemoteNotFound(name.to_string()).into());
        }

        let location = std::fs::read_to_string(self.remote_path(name))
            .with_context(|| format!("failed to read remote {name}"))?;
        Ok(PathBuf::from(location.trim_end_matches('\n')))
    }

    fn validate_name(name: &str) -> anyhow::Result<()> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            anyhow::bail!("Invalid remote name: {name}");
        }
        Ok(())
    }

    fn remote_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}
