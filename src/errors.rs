//! Domain error types
//!
//! Every failure a repository operation can surface to the user is listed here.
//! Commands return them wrapped in `anyhow::Error`, so callers that care about the
//! exact failure can `downcast_ref::<TwigError>()`.
//!
//! The display strings double as the user-facing messages printed by the CLI.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwigError {
    /// no object with the given id exists in the store
    #[error("No object with id {0} exists.")]
    ObjectNotFound(ObjectId),

    /// a commit reference did not resolve to a stored commit
    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    /// an abbreviated id matches more than one commit
    #[error("Commit id {prefix} is ambiguous: {candidates:?}")]
    AmbiguousCommit {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    /// `find` matched nothing
    #[error("Found no commit with that message.")]
    NoCommitWithMessage(String),

    /// a branch to remove or merge does not exist
    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    /// a branch to check out does not exist
    #[error("No such branch exists.")]
    NoSuchBranch(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    /// the file to stage is missing from the working directory
    #[error("File does not exist.")]
    FileNotFound(PathBuf),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(PathBuf),

    /// checkout, reset or merge would clobber files that are not tracked
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<PathBuf>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    /// the remote branch tip is not part of the local history
    #[error("Please pull down remote changes before pushing.")]
    DivergedHistory,

    #[error("That remote does not have that branch.")]
    UnknownRemoteBranch(String),

    #[error("A remote with that name does not exist.")]
    RemoteNotFound(String),

    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists(String),

    /// the remote location does not hold a repository
    #[error("Remote directory not found.")]
    RemoteDirectoryMissing(PathBuf),

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,
}

impl TwigError {
    /// Look through an `anyhow::Error` for a domain error.
    pub fn find(error: &anyhow::Error) -> Option<&TwigError> {
        error.downcast_ref::<TwigError>()
    }
}
