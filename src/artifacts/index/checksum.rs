use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{Read, Write};
use std::ops::DerefMut;

/// A locked index file whose traffic is fed through SHA-1.
///
/// Writers finish with `write_checksum`, readers with `verify`.
pub struct Checksum<'f> {
    file: FileGuard<&'f mut File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Vec<u8>> {
        let mut buffer = vec![0; size];
        self.file
            .deref_mut()
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading the staging index"))?;

        self.digest.update(&buffer);
        Ok(buffer)
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(mut self) -> anyhow::Result<()> {
        let checksum = self.digest.finalize_reset();
        self.file.deref_mut().write_all(&checksum)?;
        self.file.deref_mut().flush()?;
        Ok(())
    }

    pub(crate) fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut stored)
            .map_err(|_| anyhow!("Staging index is missing its checksum"))?;

        if stored.as_slice() != self.digest.finalize_reset().as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}
