//! Shared output plumbing
//!
//! `log` and `global-log` can print thousands of lines, so the binary routes
//! them through the `minus` pager when stdout is interactive.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over a minus pager
///
/// The repository writes through a `Box<dyn Write>`; wrapping the pager lets
/// paged commands share that path with everything else.
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let mut repository = Repository::new(root, Box::new(writer))?;
/// repository.log()?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
