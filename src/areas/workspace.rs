use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const REPOSITORY_DIR: &str = ".twig";

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file in the working directory, relative to its root and sorted.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !Self::is_ignored_name(entry.file_name().to_string_lossy().as_ref())
        }) {
            let entry = entry.with_context(|| {
                format!("Unable to list the working directory {}", self.path.display())
            })?;

            if entry.file_type().is_file()
                && let Some(file_path) = self.check_if_not_ignored_file_path(entry.path())
            {
                files.push(file_path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Every working file mapped to the id its content would get as a blob.
    pub fn working_snapshot(&self) -> anyhow::Result<Snapshot> {
        self.list_files()?
            .into_iter()
            .map(|file_path| {
                let oid = self.parse_blob(&file_path)?.object_id()?;
                Ok((file_path, oid))
            })
            .collect()
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Turn a user-supplied path into one relative to the working directory root.
    pub fn relative_path(&self, file_path: &Path) -> anyhow::Result<PathBuf> {
        let relative = if file_path.is_absolute() {
            file_path
                .strip_prefix(&self.path)
                .with_context(|| {
                    format!("{} is outside of the repository", file_path.display())
                })?
                .to_path_buf()
        } else {
            file_path.to_path_buf()
        };

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => normalized.push(name),
                _ => anyhow::bail!("{} is outside of the repository", file_path.display()),
            }
        }

        Ok(normalized)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        std::fs::read(&full_path)
            .map(Bytes::from)
            .with_context(|| format!("Unable to read file {}", full_path.display()))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::new(file_path.to_path_buf(), data))
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {:?}", parent)
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a file and any directories it leaves empty.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    // Deletions go first so a file replaced by a directory of the same name
    // (or the reverse) never collides with its replacement.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        migration
            .deletions()
            .iter()
            .map(|file_path| self.remove_file(file_path))
            .collect::<anyhow::Result<Vec<()>>>()?;

        migration
            .writes()
            .iter()
            .map(|(file_path, oid)| {
                let blob = database.parse_object_as_blob(oid)?;
                self.write_file(file_path, blob.content())
            })
            .collect::<anyhow::Result<Vec<()>>>()?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn is_ignored_name(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;

        let ignored = relative_path.components().any(|component| match component {
            Component::Normal(name) => Self::is_ignored_name(name.to_string_lossy().as_ref()),
            _ => false,
        });

        (!ignored).then(|| relative_path.to_path_buf())
    }
}
