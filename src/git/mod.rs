//! Repository access layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations git-reaper needs: listing local branches, testing commit
//! ancestry, reading commit metadata and deleting a branch reference.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Code that analyses branches should depend on the [Repository] trait rather
//! than a concrete implementation.

pub mod ancestry;
pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::Path;

/// Number of hex characters shown for a commit hash
pub const SHORT_HASH_LEN: usize = 8;

/// A local branch and the commit at its tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub tip: Oid,
}

impl BranchRef {
    pub fn new(name: impl Into<String>, tip: Oid) -> Self {
        BranchRef {
            name: name.into(),
            tip,
        }
    }
}

/// Display metadata for a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    /// The commit hash (shortened)
    pub short_hash: String,
    /// The commit author
    pub author_name: String,
}

/// Shorten a commit id for display
pub fn short_hash(oid: Oid) -> String {
    let mut hash = oid.to_string();
    hash.truncate(SHORT_HASH_LEN);
    hash
}

/// Common repository operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying errors (like `git2::Error`) onto the [crate::error::ReaperError]
/// variant that matches the failing operation, so callers can decide whether
/// a failure is structural or local to one branch.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation
pub trait Repository {
    /// Absolute path of the repository root
    fn root_path(&self) -> &Path;

    /// List local branches with their tip commits
    ///
    /// # Returns
    /// * `Ok(Vec<BranchRef>)` - Local branches, sorted by name
    /// * `Err(EnumerationFailure)` - If the reference store cannot be read
    fn list_branches(&self) -> Result<Vec<BranchRef>>;

    /// Check whether `ancestor` is reachable from `descendant`
    ///
    /// A commit counts as its own ancestor, so a branch that was merged
    /// without diverging is still reported as merged. All parents of merge
    /// commits are followed.
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether `ancestor` is an ancestor of or equal to `descendant`
    /// * `Err(ReferenceResolutionFailure)` - If either commit cannot be resolved
    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool>;

    /// Resolve display metadata for a commit
    ///
    /// # Returns
    /// * `Ok(CommitMeta)` - Short hash and author name
    /// * `Err(ReferenceResolutionFailure)` - If the commit cannot be found
    fn commit_meta(&self, oid: Oid) -> Result<CommitMeta>;

    /// Delete a local branch reference
    ///
    /// There is no undo.
    ///
    /// # Returns
    /// * `Ok(())` - The reference was removed
    /// * `Err(DeleteFailure)` - If the branch does not exist or cannot be removed,
    ///   for example because it is checked out
    fn delete_branch(&self, name: &str) -> Result<()>;
}
