//! Per-file decisions of a three-way merge
//!
//! Each path is judged from three versions: the split point (S), the current
//! branch tip (C) and the other branch tip (O). Any of them may be absent.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The current version (or its absence) stands
    KeepCurrent,
    /// Check out and stage the other branch's version
    TakeOther(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Both sides changed the file in different ways
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Decide what happens to one path.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> Resolution {
    if current == other {
        return Resolution::KeepCurrent;
    }

    match (split, current, other) {
        // only the other side moved away from the split point
        (split, current, Some(other)) if current == split => Resolution::TakeOther(other.clone()),
        (Some(_), current, None) if current == split => Resolution::Remove,
        // only the current side moved away
        (split, _, other) if other == split => Resolution::KeepCurrent,
        (_, current, other) => Resolution::Conflict {
            current: current.cloned(),
            other: other.cloned(),
        },
    }
}

/// Classify every path of the three snapshots, dropping the ones that keep
/// the current version.
pub fn resolve_all(
    split: &Snapshot,
    current: &Snapshot,
    other: &Snapshot,
) -> BTreeMap<PathBuf, Resolution> {
    let paths = split
        .keys()
        .chain(current.keys())
        .chain(other.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .filter_map(|path| {
            let resolution = classify(split.get(path), current.get(path), other.get(path));
            (resolution != Resolution::KeepCurrent).then(|| (path.clone(), resolution))
        })
        .collect()
}
