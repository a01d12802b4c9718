//! Remote commands
//!
//! A remote is another repository on the same file system, recorded by the
//! path of its `.twig` directory. History moves between the two object
//! stores commit by commit, blobs first, ancestors before descendants.
//!
//! - `add-remote` / `rm-remote`: manage the remote table
//! - `push`: send the current history to a remote branch
//! - `fetch` / `pull`: bring a remote branch into `<remote>/<branch>`

pub mod fetch;
pub mod push;

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::collections::{HashMap, HashSet};
use std::path::Path;

const OBJECTS_DIR: &str = "objects";
const STAGED_OBJECTS_DIR: &str = "staged-objects";

/// Object store and refs of a remote repository
pub(crate) struct RemoteStore {
    database: Database,
    refs: Refs,
}

impl Repository {
    pub fn add_remote(&mut self, name: &str, location: &str) -> anyhow::Result<()> {
        self.remotes().add(name, Path::new(location))
    }

    pub fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes().remove(name)
    }

    pub(crate) fn open_remote(&self, name: &str) -> anyhow::Result<RemoteStore> {
        let location = self.remotes().location(name)?;
        let twig_path = if location.is_absolute() {
            location
        } else {
            self.path().join(location)
        };

        if !twig_path.join(OBJECTS_DIR).is_dir() {
            return Err(TwigError::RemoteDirectoryMissing(twig_path).into());
        }

        Ok(RemoteStore {
            database: Database::new(
                twig_path.join(OBJECTS_DIR).into_boxed_path(),
                twig_path.join(STAGED_OBJECTS_DIR).into_boxed_path(),
            ),
            refs: Refs::new(twig_path.into_boxed_path()),
        })
    }
}

/// Copy every commit reachable from `tip` that `target` lacks, with the
/// blobs of its snapshot. Returns how many commits were copied.
pub(crate) fn transfer_history(
    source: &Database,
    target: &Database,
    tip: &ObjectId,
) -> anyhow::Result<usize> {
    let mut missing = HashMap::new();
    let mut pending = vec![tip.clone()];

    // a commit present at the target brings its whole history with it
    while let Some(commit_id) = pending.pop() {
        if target.contains(&commit_id) || missing.contains_key(&commit_id) {
            continue;
        }

        let commit = source.parse_object_as_commit(&commit_id)?;
        pending.extend(commit.parents());
        missing.insert(commit_id, commit);
    }

    let ordered = parents_first(tip, &missing);
    for commit_id in &ordered {
        let Some(commit) = missing.get(commit_id) else {
            continue;
        };

        for blob_id in commit.snapshot().values() {
            if !target.contains(blob_id) {
                source.copy_object_to(blob_id, target)?;
            }
        }
        source.copy_object_to(commit_id, target)?;
    }

    Ok(ordered.len())
}

/// Post-order walk over the missing commits so every parent precedes its
/// children.
fn parents_first(tip: &ObjectId, missing: &HashMap<ObjectId, Commit>) -> Vec<ObjectId> {
    let mut ordered = Vec::with_capacity(missing.len());
    let mut emitted = HashSet::new();
    let mut stack = vec![(tip.clone(), false)];

    while let Some((commit_id, expanded)) = stack.pop() {
        if emitted.contains(&commit_id) {
            continue;
        }
        let Some(commit) = missing.get(&commit_id) else {
            continue;
        };

        if expanded {
            emitted.insert(commit_id.clone());
            ordered.push(commit_id);
        } else {
            stack.push((commit_id, true));
            stack.extend(
                commit
                    .parents()
                    .into_iter()
                    .filter(|parent| !emitted.contains(parent))
                    .map(|parent| (parent, false)),
            );
        }
    }

    ordered
}
