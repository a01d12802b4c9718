//! Three-way merge
//!
//! - `split_point`: nearest common ancestor of two branch tips
//! - `resolution`: per-file decision from the split, current and other versions
//! - `conflict`: conflict-marker synthesis

pub mod conflict;
pub mod resolution;
pub mod split_point;
