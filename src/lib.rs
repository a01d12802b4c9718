//! twig: a small local version-control system
//!
//! - `areas`: the repository facade and the stores it owns
//! - `artifacts`: objects, codecs and the algorithms behind the commands
//! - `commands`: porcelain and remote operations on [`areas::repository::Repository`]
//! - `errors`: the domain error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
