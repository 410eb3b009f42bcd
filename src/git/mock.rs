use crate::error::{ReaperError, Result};
use crate::git::{ancestry, short_hash, BranchRef, CommitMeta, Repository};
use git2::Oid;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct MockCommit {
    parents: Vec<Oid>,
    author: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    root: PathBuf,
    commits: HashMap<Oid, MockCommit>,
    branch_heads: Mutex<BTreeMap<String, Oid>>,
    failing_deletes: HashMap<String, String>,
    unresolvable: HashSet<Oid>,
    enumeration_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            root: PathBuf::from("/mock/repo"),
            commits: HashMap::new(),
            branch_heads: Mutex::new(BTreeMap::new()),
            failing_deletes: HashMap::new(),
            unresolvable: HashSet::new(),
            enumeration_error: None,
        }
    }

    /// Build a deterministic commit id from a small number
    pub fn oid(n: u8) -> Oid {
        let mut bytes = [0u8; 20];
        bytes[0] = n;
        bytes[19] = n;
        Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
    }

    /// Add a commit with its parents to the mock repository
    pub fn add_commit(&mut self, oid: Oid, parents: &[Oid], author: impl Into<String>) {
        self.commits.insert(
            oid,
            MockCommit {
                parents: parents.to_vec(),
                author: author.into(),
            },
        );
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.heads().insert(branch.into(), oid);
    }

    /// Make deleting `branch` fail with `reason`
    pub fn fail_delete(&mut self, branch: impl Into<String>, reason: impl Into<String>) {
        self.failing_deletes.insert(branch.into(), reason.into());
    }

    /// Make every lookup of `oid` fail as if the object were missing
    pub fn make_unresolvable(&mut self, oid: Oid) {
        self.unresolvable.insert(oid);
    }

    /// Make branch enumeration fail
    pub fn fail_enumeration(&mut self, reason: impl Into<String>) {
        self.enumeration_error = Some(reason.into());
    }

    /// Names of the branches that still exist
    pub fn branch_names(&self) -> Vec<String> {
        self.heads().keys().cloned().collect()
    }

    fn heads(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Oid>> {
        // a poisoned lock only means another test thread panicked
        self.branch_heads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn commit(&self, oid: Oid) -> Result<&MockCommit> {
        if self.unresolvable.contains(&oid) {
            return Err(ReaperError::unresolved(oid.to_string(), "object is corrupt"));
        }
        self.commits
            .get(&oid)
            .ok_or_else(|| ReaperError::unresolved(oid.to_string(), "commit not found"))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn root_path(&self) -> &Path {
        &self.root
    }

    fn list_branches(&self) -> Result<Vec<BranchRef>> {
        if let Some(reason) = &self.enumeration_error {
            return Err(ReaperError::enumeration(reason.clone()));
        }
        Ok(self
            .heads()
            .iter()
            .map(|(name, tip)| BranchRef::new(name.clone(), *tip))
            .collect())
    }

    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        self.commit(ancestor)?;
        self.commit(descendant)?;
        ancestry::is_reachable(ancestor, descendant, |oid| {
            Ok(self.commit(oid)?.parents.clone())
        })
    }

    fn commit_meta(&self, oid: Oid) -> Result<CommitMeta> {
        let commit = self.commit(oid)?;
        Ok(CommitMeta {
            short_hash: short_hash(oid),
            author_name: commit.author.clone(),
        })
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        if let Some(reason) = self.failing_deletes.get(name) {
            return Err(ReaperError::delete(name, reason.clone()));
        }
        self.heads()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ReaperError::delete(name, "branch not found"))
    }
}
