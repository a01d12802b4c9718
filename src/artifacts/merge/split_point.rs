//! Split point discovery for three-way merges
//!
//! The split point of two commits is the nearest commit both of them can
//! reach through parent edges (first and second parents alike).
//!
//! ## Algorithm
//!
//! 1. Collect every commit reachable from the *other* commit
//! 2. Walk the *current* commit's history breadth-first, one depth at a time,
//!    visiting first parents before second parents
//! 3. The first depth that contains commits from step 1 decides: the commit
//!    with the latest timestamp wins, and equal timestamps keep the one
//!    discovered first
//!
//! Both walks go through a commit loader, so the finder works the same on
//! the object store and on an in-memory graph.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to trace every depth of the walk on
//! stderr.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_CURRENT = 0b01;
        const REACHABLE_FROM_OTHER = 0b10;
        const COMMON = Self::VISITED_FROM_CURRENT.bits() | Self::REACHABLE_FROM_OTHER.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::REACHABLE_FROM_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Every commit reachable from `start`, `start` included.
///
/// Parents are followed on both edges; each commit is loaded once.
pub fn reachable_set<CommitLoaderFn>(
    start: &ObjectId,
    commit_loader: &CommitLoaderFn,
) -> anyhow::Result<HashSet<ObjectId>>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    let mut reachable = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(commit_id) = queue.pop_front() {
        let commit = commit_loader(&commit_id)?;
        for parent_id in commit.parents {
            if reachable.insert(parent_id.clone()) {
                queue.push_back(parent_id);
            }
        }
    }

    Ok(reachable)
}

pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Whether `ancestor` can be reached from `descendant`.
    ///
    /// A commit counts as its own ancestor.
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        Ok(reachable_set(descendant, &self.commit_loader)?.contains(ancestor))
    }

    /// The split point of `current` and `other`, or `None` for unrelated histories.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = reachable_set(other, &self.commit_loader)?
            .into_iter()
            .map(|oid| (oid, VisitState::REACHABLE_FROM_OTHER))
            .collect::<HashMap<_, _>>();

        let mut level = vec![current.clone()];
        Self::mark_visited(&mut states, current);

        while !level.is_empty() {
            let candidates = level
                .iter()
                .filter(|oid| states.get(*oid).is_some_and(|s| s.contains(VisitState::COMMON)))
                .collect::<Vec<_>>();

            debug_log!(
                "Visiting {}",
                level
                    .iter()
                    .map(|oid| format!("{}={}", oid.to_short_oid(), states[oid]))
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            if !candidates.is_empty() {
                return self.latest_of(candidates).map(Some);
            }

            let mut next_level = Vec::new();
            for commit_id in &level {
                let commit = (self.commit_loader)(commit_id)?;
                for parent_id in commit.parents {
                    if Self::mark_visited(&mut states, &parent_id) {
                        next_level.push(parent_id);
                    }
                }
            }

            level = next_level;
        }

        debug_log!("No split point between {} and {}", current, other);

        Ok(None)
    }

    /// Returns false when the commit had already been visited.
    fn mark_visited(states: &mut HashMap<ObjectId, VisitState>, oid: &ObjectId) -> bool {
        let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
        if state.contains(VisitState::VISITED_FROM_CURRENT) {
            return false;
        }

        *state |= VisitState::VISITED_FROM_CURRENT;
        true
    }

    fn latest_of(&self, candidates: Vec<&ObjectId>) -> anyhow::Result<ObjectId> {
        let mut best: Option<SlimCommit> = None;

        for candidate in candidates {
            let commit = (self.commit_loader)(candidate)?;
            // strictly later only, so ties keep discovery order
            if best
                .as_ref()
                .is_none_or(|best| commit.timestamp > best.timestamp)
            {
                best = Some(commit);
            }
        }

        debug_log!(
            "Split point: {}",
            best.as_ref().map(|c| c.oid.to_string()).unwrap_or_default()
        );

        best.map(|commit| commit.oid)
            .ok_or_else(|| anyhow::anyhow!("no candidate split point to choose from"))
    }
}
