//! Staging index file format
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, each padded to 8-byte alignment):
//!   - Bucket (1 byte)
//!   - Object id flag (1 byte)
//!   - Object id (20 bytes, zeroed when absent)
//!   - Path, NUL terminated
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying staging index files
pub const SIGNATURE: &str = "STAG";

/// Index file format version
pub const VERSION: u32 = 1;
