//! One record of the staging index
//!
//! A path appears once per bucket it belongs to: a tracked file that was
//! edited and re-added shows up both as `Tracked` and `StagedAdd`.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const ENTRY_BLOCK: usize = 8;

/// Bucket + flag + 20-byte id + a one-byte path + NUL, rounded up to a block
pub const ENTRY_MIN_SIZE: usize = 24;

const OID_OFFSET: usize = 2;
const PATH_OFFSET: usize = OID_OFFSET + 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Tracked,
    StagedAdd,
    StagedRemove,
    Modified,
    Untracked,
}

impl Bucket {
    pub fn as_u8(&self) -> u8 {
        match self {
            Bucket::Tracked => 0,
            Bucket::StagedAdd => 1,
            Bucket::StagedRemove => 2,
            Bucket::Modified => 3,
            Bucket::Untracked => 4,
        }
    }
}

impl TryFrom<u8> for Bucket {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> anyhow::Result<Self> {
        match value {
            0 => Ok(Bucket::Tracked),
            1 => Ok(Bucket::StagedAdd),
            2 => Ok(Bucket::StagedRemove),
            3 => Ok(Bucket::Modified),
            4 => Ok(Bucket::Untracked),
            _ => Err(anyhow::anyhow!("Unknown staging bucket {value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub bucket: Bucket,
    pub path: PathBuf,
    pub oid: Option<ObjectId>,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path
            .to_str()
            .with_context(|| format!("Invalid entry path {:?}", self.path))?;
        if path.is_empty() || path.contains('\0') {
            anyhow::bail!("Invalid entry path {:?}", self.path);
        }

        let mut entry_bytes = Vec::with_capacity(ENTRY_MIN_SIZE + path.len());
        entry_bytes.push(self.bucket.as_u8());

        match &self.oid {
            Some(oid) => {
                entry_bytes.push(1);
                oid.write_h40_to(&mut entry_bytes)?;
            }
            None => {
                entry_bytes.push(0);
                entry_bytes.extend_from_slice(&[0u8; 20]);
            }
        }
        entry_bytes.write_all(path.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_MIN_SIZE {
            anyhow::bail!("Invalid index entry size");
        }

        let bucket = Bucket::try_from(bytes[0])?;
        let oid = match bytes[1] {
            0 => None,
            _ => {
                let mut oid_bytes = std::io::Cursor::new(&bytes[OID_OFFSET..PATH_OFFSET]);
                Some(ObjectId::read_h40_from(&mut oid_bytes)?)
            }
        };

        let path_end = bytes[PATH_OFFSET..]
            .iter()
            .position(|&b| b == 0)
            .context("Missing null terminator in entry path")?;
        let path = std::str::from_utf8(&bytes[PATH_OFFSET..PATH_OFFSET + path_end])
            .context("Invalid UTF-8 in entry path")?;

        Ok(IndexEntry::new(bucket, PathBuf::from(path), oid))
    }
}
