//! Content-addressed object store
//!
//! Objects are zlib-compressed and written once under `XX/YYYY...`. Two areas
//! share the same layout:
//!
//! - the durable area (`.twig/objects`) holding everything a commit references
//! - the staged area (`.twig/staged-objects`) holding blobs created by `add`
//!   that no commit references yet; they are promoted on commit and discarded
//!   when the add is undone

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    staged_path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>, staged_path: Box<Path>) -> Self {
        Database { path, staged_path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn staged_path(&self) -> &Path {
        &self.staged_path
    }

    /// Write an object to the durable area unless it is already there.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        Self::store_in(&self.path, object)
    }

    /// Write a blob to the staged area.
    pub fn store_staged(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        Self::store_in(&self.staged_path, blob)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    pub fn contains_staged(&self, object_id: &ObjectId) -> bool {
        self.staged_path.join(object_id.to_path()).exists()
    }

    /// Move a staged blob into the durable area.
    ///
    /// Objects that are already durable are left alone.
    pub fn promote(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let staged_object_path = self.staged_path.join(object_id.to_path());

        if self.contains(object_id) {
            return self.discard_staged(object_id);
        }
        if !staged_object_path.exists() {
            return Err(TwigError::ObjectNotFound(object_id.clone()).into());
        }

        let object_path = self.path.join(object_id.to_path());
        Self::ensure_parent_dir(&object_path)?;
        std::fs::rename(&staged_object_path, &object_path).with_context(|| {
            format!(
                "Unable to promote staged object {} to {}",
                object_id,
                object_path.display()
            )
        })?;

        Ok(())
    }

    pub fn discard_staged(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let staged_object_path = self.staged_path.join(object_id.to_path());

        if staged_object_path.exists() {
            std::fs::remove_file(&staged_object_path).with_context(|| {
                format!(
                    "Unable to discard staged object {}",
                    staged_object_path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Drop every staged blob.
    pub fn clear_staged(&self) -> anyhow::Result<()> {
        if self.staged_path.exists() {
            std::fs::remove_dir_all(&self.staged_path).with_context(|| {
                format!(
                    "Unable to clear staged objects at {}",
                    self.staged_path.display()
                )
            })?;
        }

        std::fs::create_dir_all(&self.staged_path).with_context(|| {
            format!(
                "Unable to create staged objects directory {}",
                self.staged_path.display()
            )
        })
    }

    /// Read the decompressed bytes of an object, durable area first.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        if object_path.exists() {
            return self.read_object(object_path);
        }

        let staged_object_path = self.staged_path.join(object_id.to_path());
        if staged_object_path.exists() {
            return self.read_object(staged_object_path);
        }

        Err(TwigError::ObjectNotFound(object_id.clone()).into())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            ObjectBox::Commit(_) => Err(TwigError::ObjectNotFound(object_id.clone()))
                .with_context(|| format!("Object {object_id} is a commit, not a blob")),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            ObjectBox::Blob(_) => Err(TwigError::CommitNotFound(object_id.to_string()).into()),
        }
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    /// Copy an object file as-is into another store, unless it is already there.
    pub fn copy_object_to(&self, object_id: &ObjectId, target: &Database) -> anyhow::Result<()> {
        if target.contains(object_id) {
            return Ok(());
        }

        let content = self.load(object_id)?;
        let object_path = target.path.join(object_id.to_path());
        Self::ensure_parent_dir(&object_path)?;

        target.write_object(object_path, content)
    }

    /// Every commit in the durable area, each listed once.
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commits = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(2).max_depth(2) {
            let entry = entry
                .with_context(|| format!("Unable to list objects in {}", self.path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(object_id) = Self::object_id_from_path(entry.path()) else {
                continue;
            };

            if self.object_type(&object_id)? == ObjectType::Commit {
                commits.push(object_id);
            }
        }

        commits.sort();
        Ok(commits)
    }

    /// Find all durable objects whose id starts with the given prefix.
    ///
    /// Used to resolve abbreviated commit ids. More than one match means the
    /// prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if prefix.len() < 2 {
            return Ok(matches);
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn object_id_from_path(path: &Path) -> Option<ObjectId> {
        let file_name = path.file_name()?.to_str()?;
        let dir_name = path.parent()?.file_name()?.to_str()?;

        ObjectId::try_parse(format!("{dir_name}{file_name}")).ok()
    }

    fn store_in(root: &Path, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = root.join(object_id.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            Self::ensure_parent_dir(&object_path)?;
            Self::write_object_file(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        Self::write_object_file(object_path, object_content)
    }

    fn write_object_file(object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn ensure_parent_dir(object_path: &Path) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;

        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// Memoizes slim commits while walking the graph.
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        object_id: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = self.commits.borrow().get(object_id) {
            return Ok(commit.clone());
        }

        let commit = database.parse_object_as_commit(object_id)?;
        let slim_commit = SlimCommit {
            oid: object_id.clone(),
            parents: commit.parents(),
            timestamp: commit.timestamp(),
        };

        self.commits
            .borrow_mut()
            .insert(object_id.clone(), slim_commit.clone());

        Ok(slim_commit)
    }
}
