//! Commit object
//!
//! A commit is a complete snapshot of the tracked files (path to blob id)
//! together with its message, timestamp and up to two parents. The root
//! commit has no parent; merge commits carry a second one.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds> <+hhmm>
//! parent <parent-sha>
//! merge <second-parent-sha>
//! file <blob-sha> <path>
//! ...
//!
//! <commit message>
//! ```
//!
//! `parent` and `merge` lines are omitted when absent. `file` lines are
//! sorted by path so a snapshot always serializes the same way.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

/// Message of the commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

const DISPLAY_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Slim representation of a commit
///
/// Only what graph walks need: the id, the parents and the timestamp.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    timestamp: DateTime<FixedOffset>,
    message: String,
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    snapshot: Snapshot,
}

impl Commit {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        message: String,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        snapshot: Snapshot,
    ) -> Self {
        Commit {
            timestamp,
            message,
            parent,
            second_parent,
            snapshot,
        }
    }

    /// The parentless commit created by `init`.
    ///
    /// It is pinned to the Unix epoch so that every repository starts from
    /// the same commit id.
    pub fn root() -> Self {
        Commit::new(
            DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            ROOT_COMMIT_MESSAGE.to_string(),
            None,
            None,
            Snapshot::new(),
        )
    }

    /// Timestamp for a new commit, honouring `TWIG_COMMIT_DATE` when set.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// Parents in traversal order: first parent, then the merged one.
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.second_parent.iter())
            .cloned()
            .collect()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn blob_oid(&self, path: &std::path::Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    pub fn to_slim(&self) -> anyhow::Result<SlimCommit> {
        Ok(SlimCommit {
            oid: self.object_id()?,
            parents: self.parents(),
            timestamp: self.timestamp,
        })
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;

        let offset = *DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .context("Invalid commit object: invalid timezone")?
        .offset();

        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .context("Invalid commit object: timestamp out of range")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self)
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut lines = headers.lines();
        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = Self::parse_timestamp(timestamp)?;

        let mut parent = None;
        let mut second_parent = None;
        let mut snapshot = Snapshot::new();

        for line in lines {
            if let Some(oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(oid) = line.strip_prefix("merge ") {
                second_parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: malformed file line")?;
                snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        Ok(Commit::new(
            timestamp,
            message.to_string(),
            parent,
            second_parent,
            snapshot,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn body(&self) -> anyhow::Result<Vec<u8>> {
        let mut lines = vec![format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("merge {second_parent}"));
        }
        for (path, oid) in &self.snapshot {
            let path = path
                .to_str()
                .with_context(|| format!("Path {path:?} is not valid UTF-8"))?;
            lines.push(format!("file {oid} {path}"));
        }

        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(lines.join("\n").into_bytes())
    }
}
