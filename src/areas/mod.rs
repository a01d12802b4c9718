//! Repository areas
//!
//! - `database`: object store for blobs and commits, durable and staged
//! - `index`: the five-bucket staging index
//! - `refs`: branch references and HEAD
//! - `remotes`: named remote repositories
//! - `repository`: the facade every command goes through
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod workspace;
