//! Command implementations
//!
//! - `porcelain`: everyday commands working on the local repository
//! - `remote`: commands exchanging history with other repositories

pub mod porcelain;
pub mod remote;
