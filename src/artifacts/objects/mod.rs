//! Stored object types
//!
//! Two kinds of objects are kept in the store, both named by the SHA-1 of
//! their serialized form:
//!
//! - **Blob**: one version of one file (path and content)
//! - **Commit**: a full path-to-blob snapshot with message, timestamp and parents
//!
//! Every object serializes as `<type> <size>\0<body>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated ids shown in logs and commit summaries
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Shortest prefix accepted when resolving an abbreviated commit id
pub const MIN_OBJECT_ID_PREFIX_LENGTH: usize = 4;
