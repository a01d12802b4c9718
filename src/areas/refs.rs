//! Branch references and HEAD
//!
//! Every branch is a file under `refs/heads/` holding the 40-character id of
//! its tip commit. Branch names may contain `/`, in which case the ref lives
//! in nested directories (remote-tracking branches such as `origin/master`).
//!
//! `HEAD` is always symbolic: `ref: refs/heads/<current-branch>`.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.twig`)
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {path:?}"))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The branch HEAD points at.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        match SymRefOrOid::read_symref_or_oid(&self.head_path())? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                BranchName::try_parse_sym_ref_name(&sym_ref_name)
            }
            Some(SymRefOrOid::Oid(oid)) => {
                anyhow::bail!("HEAD must point at a branch, found commit {oid}")
            }
            None => Err(TwigError::NotInitialized.into()),
        }
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Point HEAD at another branch.
    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let sym_ref_name = SymRefName::from(branch_name);
        self.update_ref_file(
            self.head_path(),
            format!("ref: {}", sym_ref_name.as_ref_path()),
        )
    }

    /// Tip of the current branch.
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;
        self.read_branch(&branch_name)?
            .ok_or_else(|| TwigError::BranchNotFound(branch_name.to_string()).into())
    }

    /// Move the current branch to a new tip.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_name = self.current_branch()?;
        self.update_branch(&branch_name, oid)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match SymRefOrOid::read_symref_or_oid(&self.branch_path(branch_name))? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::SymRef { sym_ref_name }) => anyhow::bail!(
                "branch {} is symbolic ({}), expected a commit id",
                branch_name,
                sym_ref_name.as_ref_path()
            ),
            None => Ok(None),
        }
    }

    /// Create or move a branch.
    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref().to_string())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(TwigError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        self.update_branch(branch_name, oid)
    }

    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(branch_name);

        match self.read_branch(branch_name)? {
            Some(oid) => {
                std::fs::remove_file(&branch_path).with_context(|| {
                    format!("failed to delete branch file at {:?}", branch_path)
                })?;
                self.prune_branch_empty_parent_dirs(&branch_path)?;

                Ok(oid)
            }
            None => Err(TwigError::BranchNotFound(branch_name.to_string()).into()),
        }
    }

    /// Every branch, sorted by name.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path) {
            let entry = entry
                .with_context(|| format!("failed to list branches in {:?}", heads_path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative_path) = entry.path().strip_prefix(&heads_path)
                && let Ok(branch) =
                    BranchName::try_parse(relative_path.to_string_lossy().replace('\\', "/"))
            {
                branches.push(branch);
            }
        }

        branches.sort();
        Ok(branches)
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.path
            .join(SymRefName::from(branch_name).as_ref_path())
            .into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
