use crate::artifacts::objects::blob::Blob;
use bytes::{BufMut, Bytes, BytesMut};
use std::path::Path;

const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const OTHER_MARKER: &[u8] = b">>>>>>>\n";

/// Content of a conflicted file.
///
/// A side that deleted the file contributes nothing between its markers.
/// Sides are pasted verbatim, so one that lacks a trailing newline runs into
/// the next marker.
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = BytesMut::with_capacity(
        CURRENT_MARKER.len() + current.len() + SEPARATOR.len() + other.len() + OTHER_MARKER.len(),
    );
    content.put_slice(CURRENT_MARKER);
    content.put_slice(current);
    content.put_slice(SEPARATOR);
    content.put_slice(other);
    content.put_slice(OTHER_MARKER);

    content.freeze()
}

/// A fresh blob holding the conflict markers for `path`.
pub fn conflict_blob(path: &Path, current: Option<&Blob>, other: Option<&Blob>) -> Blob {
    Blob::new(
        path.to_path_buf(),
        conflict_content(current.map(Blob::content), other.map(Blob::content)),
    )
}
