//! Staging index
//!
//! The staging index sorts paths into five buckets:
//!
//! - `tracked`: path to blob id as of the last commit, checkout or reset (the baseline)
//! - `staged_add`: path to the blob id that the next commit will record
//! - `staged_remove`: paths the next commit will drop, with the blob they had if any
//! - `modified`: tracked paths whose working content drifted and is not staged
//! - `untracked`: working files the baseline does not know and that are not staged
//!
//! The index is persisted to `.twig/index` with a SHA-1 trailer and is only
//! written back once an operation has decided all of its effects.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{Bucket, ENTRY_BLOCK, ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StagingIndex {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    tracked: BTreeMap<PathBuf, ObjectId>,
    staged_add: BTreeMap<PathBuf, ObjectId>,
    staged_remove: BTreeMap<PathBuf, Option<ObjectId>>,
    modified: BTreeSet<PathBuf>,
    untracked: BTreeSet<PathBuf>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl StagingIndex {
    pub fn new(path: Box<Path>) -> Self {
        StagingIndex {
            path,
            tracked: BTreeMap::new(),
            staged_add: BTreeMap::new(),
            staged_remove: BTreeMap::new(),
            modified: BTreeSet::new(),
            untracked: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Load the index from disk.
    ///
    /// A missing or empty file is an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.forget_everything();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;
        self.parse_entries(header.entries_count, &mut reader)?;

        reader.verify()?;
        self.changed = false;

        Ok(())
    }

    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?;

            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend(reader.read(ENTRY_BLOCK)?);
            }

            let entry = IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?;
            self.store_entry(entry)?;
        }

        Ok(())
    }

    fn store_entry(&mut self, entry: IndexEntry) -> anyhow::Result<()> {
        let IndexEntry { bucket, path, oid } = entry;

        match (bucket, oid) {
            (Bucket::Tracked, Some(oid)) => {
                self.tracked.insert(path, oid);
            }
            (Bucket::StagedAdd, Some(oid)) => {
                self.staged_add.insert(path, oid);
            }
            (Bucket::StagedRemove, oid) => {
                self.staged_remove.insert(path, oid);
            }
            (Bucket::Modified, _) => {
                self.modified.insert(path);
            }
            (Bucket::Untracked, _) => {
                self.untracked.insert(path);
            }
            (bucket, None) => anyhow::bail!("{bucket:?} entry for {path:?} has no object id"),
        }

        Ok(())
    }

    fn entries(&self) -> Vec<IndexEntry> {
        let tracked = self
            .tracked
            .iter()
            .map(|(path, oid)| IndexEntry::new(Bucket::Tracked, path.clone(), Some(oid.clone())));
        let staged_add = self.staged_add.iter().map(|(path, oid)| {
            IndexEntry::new(Bucket::StagedAdd, path.clone(), Some(oid.clone()))
        });
        let staged_remove = self
            .staged_remove
            .iter()
            .map(|(path, oid)| IndexEntry::new(Bucket::StagedRemove, path.clone(), oid.clone()));
        let modified = self
            .modified
            .iter()
            .map(|path| IndexEntry::new(Bucket::Modified, path.clone(), None));
        let untracked = self
            .untracked
            .iter()
            .map(|path| IndexEntry::new(Bucket::Untracked, path.clone(), None));

        tracked
            .chain(staged_add)
            .chain(staged_remove)
            .chain(modified)
            .chain(untracked)
            .collect()
    }

    /// Persist the index.
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);
        let entries = self.entries();

        writer.write(&IndexHeader::with_entries(entries.len())?.serialize()?)?;
        for entry in entries {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    pub fn tracked(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.tracked
    }

    pub fn staged_adds(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.staged_add
    }

    pub fn staged_removes(&self) -> &BTreeMap<PathBuf, Option<ObjectId>> {
        &self.staged_remove
    }

    pub fn modified(&self) -> &BTreeSet<PathBuf> {
        &self.modified
    }

    pub fn untracked(&self) -> &BTreeSet<PathBuf> {
        &self.untracked
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }

    pub fn tracked_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.tracked.get(path)
    }

    pub fn staged_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.staged_add.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.staged_remove.contains_key(path)
    }

    pub fn has_staged_changes(&self) -> bool {
        !self.staged_add.is_empty() || !self.staged_remove.is_empty()
    }

    /// Undo the staged removal of a tracked path.
    ///
    /// Returns false when the path is not tracked or nothing was staged for
    /// its removal.
    pub fn restore_removal(&mut self, path: &Path) -> bool {
        let restored =
            self.tracked.contains_key(path) && self.staged_remove.remove(path).is_some();
        if restored {
            self.untracked.remove(path);
            self.changed = true;
        }
        restored
    }

    /// Record `oid` as the next version of `path`, cancelling any staged
    /// removal of it.
    ///
    /// Returns the id previously staged for the path when it differs, so the
    /// caller can discard that blob.
    pub fn stage_add(&mut self, path: &Path, oid: ObjectId) -> Option<ObjectId> {
        self.modified.remove(path);
        self.untracked.remove(path);
        self.staged_remove.remove(path);
        self.changed = true;

        self.staged_add
            .insert(path.to_path_buf(), oid.clone())
            .filter(|previous| previous != &oid)
    }

    /// Drop any staged version of `path`, returning its blob id.
    pub fn unstage_add(&mut self, path: &Path) -> Option<ObjectId> {
        let previous = self.staged_add.remove(path);
        if previous.is_some() {
            self.changed = true;
        }
        previous
    }

    /// Content matches the baseline again: forget pending marks for `path`.
    pub fn clear_marks(&mut self, path: &Path) {
        self.modified.remove(path);
        self.untracked.remove(path);
        self.changed = true;
    }

    /// Mark `path` for removal. A path is never staged both ways, so any
    /// staged version is dropped; callers discard its blob beforehand.
    pub fn stage_removal(&mut self, path: &Path, oid: Option<ObjectId>) {
        self.modified.remove(path);
        self.untracked.remove(path);
        self.staged_add.remove(path);
        self.staged_remove.insert(path.to_path_buf(), oid);
        self.changed = true;
    }

    pub fn mark_untracked(&mut self, path: &Path) {
        self.untracked.insert(path.to_path_buf());
        self.changed = true;
    }

    /// Re-sort paths against the working directory.
    ///
    /// `working_files` maps every file present in the working directory to the
    /// id its current content would get as a blob.
    pub fn reclassify(&mut self, working_files: &BTreeMap<PathBuf, ObjectId>) {
        self.modified = self
            .tracked
            .iter()
            .filter_map(|(path, tracked_oid)| {
                let working_oid = working_files.get(path)?;
                let staged_same = self.staged_add.get(path) == Some(working_oid);
                (working_oid != tracked_oid && !staged_same).then(|| path.clone())
            })
            .collect();

        self.untracked = working_files
            .iter()
            .filter(|(path, working_oid)| {
                !self.tracked.contains_key(*path)
                    && self.staged_add.get(*path) != Some(*working_oid)
            })
            .map(|(path, _)| path.clone())
            .collect();

        let vanished = self
            .tracked
            .iter()
            .filter(|(path, _)| !working_files.contains_key(*path))
            .map(|(path, oid)| (path.clone(), Some(oid.clone())))
            .collect::<Vec<_>>();
        self.staged_remove.extend(vanished);

        self.changed = true;
    }

    /// Make `snapshot` the new baseline and empty every other bucket.
    pub fn reset_baseline(&mut self, snapshot: &Snapshot) {
        self.forget_everything();
        self.tracked = snapshot.clone();
        self.changed = true;
    }

    /// Empty the staged buckets and pending marks, keeping the baseline.
    pub fn clear(&mut self) {
        self.staged_add.clear();
        self.staged_remove.clear();
        self.modified.clear();
        self.changed = true;
    }

    fn forget_everything(&mut self) {
        self.tracked.clear();
        self.staged_add.clear();
        self.staged_remove.clear();
        self.modified.clear();
        self.untracked.clear();
        self.changed = false;
    }
}
