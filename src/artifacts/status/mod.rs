//! Working directory status
//!
//! - `file_change`: how a file drifted from what the next commit would record
//! - `inspector`: read-only comparison of the staging index and the working directory
//! - `shadow`: the working directory listing saved at the end of every command
//! - `status_info`: the sections printed by `status`

pub mod file_change;
pub mod inspector;
pub mod shadow;
pub mod status_info;
