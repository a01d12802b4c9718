//! Version-control data structures and algorithms
//!
//! - `branch`: branch names and commit references
//! - `checkout`: working directory migrations and the untracked-file guard
//! - `core`: shared utilities (pager wrapper)
//! - `index`: binary codec of the staging index
//! - `log`: commit history traversal
//! - `merge`: split point, per-file resolution and conflict markers
//! - `objects`: blob and commit objects
//! - `status`: working directory status and the shadow snapshot

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
