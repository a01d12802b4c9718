//! Porcelain commands
//!
//! Each command is an `impl Repository` block. Commands check everything
//! that can fail before touching the working directory, and write the staging
//! index back only once their effects are decided.
//!
//! ## Commands
//!
//! - `init`: create a repository with the shared root commit
//! - `add` / `rm`: stage additions and removals
//! - `commit`: snapshot the staged changes
//! - `log`: `log`, `global-log` and `find`
//! - `status`: branches and staging state
//! - `branch`: create and remove branches
//! - `checkout`: switch branches, restore files, `reset`
//! - `merge`: three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rm;
pub mod status;
