//! Commit graph reachability.

use crate::error::Result;
use git2::Oid;
use std::collections::{HashSet, VecDeque};

/// Breadth-first search from `descendant` along parent edges looking for `ancestor`.
///
/// `parents_of` resolves the parents of a single commit; any error it returns
/// aborts the search. Every commit is expanded at most once, so histories
/// with many merges stay linear in the number of commits visited.
pub fn is_reachable<F>(ancestor: Oid, descendant: Oid, mut parents_of: F) -> Result<bool>
where
    F: FnMut(Oid) -> Result<Vec<Oid>>,
{
    if ancestor == descendant {
        return Ok(true);
    }

    let mut visited = HashSet::from([descendant]);
    let mut frontier = VecDeque::from([descendant]);

    while let Some(oid) = frontier.pop_front() {
        for parent in parents_of(oid)? {
            if parent == ancestor {
                return Ok(true);
            }
            if visited.insert(parent) {
                frontier.push_back(parent);
            }
        }
    }

    Ok(false)
}
