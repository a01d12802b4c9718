//! Blob object
//!
//! A blob is one version of one file. Its identity covers both the file's
//! path and its content, so the same bytes stored under two names are two
//! distinct blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<path>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Path relative to the repository root
    path: PathBuf,
    /// Raw file bytes, not necessarily text
    content: Bytes,
}

impl Blob {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        frame(self)
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut path = Vec::new();
        reader.read_until(b'\0', &mut path)?;
        if path.pop() != Some(b'\0') {
            anyhow::bail!("Invalid blob object: missing path terminator");
        }
        let path = String::from_utf8(path).context("Invalid blob object: path is not UTF-8")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Blob::new(PathBuf::from(path), Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn body(&self) -> anyhow::Result<Vec<u8>> {
        let path = self
            .path
            .to_str()
            .with_context(|| format!("Path {:?} is not valid UTF-8", self.path))?;

        let mut body = Vec::with_capacity(path.len() + self.content.len() + 1);
        body.write_all(path.as_bytes())?;
        body.write_all(b"\0")?;
        body.write_all(&self.content)?;

        Ok(body)
    }
}
