use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Fixed-size preamble of the staging index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn with_entries(entries_count: usize) -> anyhow::Result<Self> {
        Ok(IndexHeader {
            version: VERSION,
            entries_count: u32::try_from(entries_count)
                .context("Too many entries for the staging index")?,
        })
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(SIGNATURE.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut signature = [0u8; 4];
        reader
            .read_exact(&mut signature)
            .context("Staging index header is truncated")?;

        if signature != SIGNATURE.as_bytes() {
            anyhow::bail!("Invalid staging index signature");
        }

        let version = reader.read_u32::<NetworkEndian>()?;
        if version != VERSION {
            anyhow::bail!("Unsupported staging index version: {version}");
        }

        let entries_count = reader.read_u32::<NetworkEndian>()?;

        Ok(IndexHeader {
            version,
            entries_count,
        })
    }
}
