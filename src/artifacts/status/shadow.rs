//! Shadow snapshot
//!
//! A listing of the working directory taken at the end of every command. The
//! next `status` compares the working directory against it to tell which
//! changes happened since the previous command.
//!
//! ## Format
//!
//! ```text
//! shadow v1
//! <blob-id> <path>
//! ...
//! ```
//!
//! A missing file, or one written by an unknown version, reads as empty.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

pub const SHADOW_HEADER: &str = "shadow v1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shadow {
    files: Snapshot,
}

impl Shadow {
    pub fn new(files: Snapshot) -> Self {
        Shadow { files }
    }

    pub fn files(&self) -> &Snapshot {
        &self.files
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Shadow::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read shadow snapshot {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut lines = content.lines();
        if lines.next() != Some(SHADOW_HEADER) {
            return Shadow::default();
        }

        let files = lines
            .filter_map(|line| {
                let (oid, path) = line.split_once(' ')?;
                let oid = ObjectId::try_parse(oid.to_string()).ok()?;
                Some((PathBuf::from(path), oid))
            })
            .collect();

        Shadow { files }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut shadow_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Unable to open shadow snapshot {}", path.display()))?;
        let mut lock = file_guard::lock(&mut shadow_file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(self.to_string().as_bytes())?;
        Ok(())
    }
}

impl std::fmt::Display for Shadow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{SHADOW_HEADER}")?;
        for (path, oid) in &self.files {
            writeln!(f, "{} {}", oid, path.display())?;
        }
        Ok(())
    }
}
