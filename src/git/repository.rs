use crate::error::{ReaperError, Result};
use crate::git::{ancestry, short_hash, BranchRef, CommitMeta};
use git2::{BranchType, Commit, ErrorCode, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    root: PathBuf,
}

impl Git2Repository {
    /// Discover the repository containing the current working directory
    pub fn open() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            ReaperError::OpenFailure(format!("cannot determine current directory: {}", e))
        })?;
        Self::open_from(cwd)
    }

    /// Discover the repository containing `path`, searching parent directories
    pub fn open_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                ReaperError::NotARepository {
                    path: path.to_path_buf(),
                }
            } else {
                ReaperError::OpenFailure(e.message().to_string())
            }
        })?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        // bare repositories have no work tree, the git dir is the root
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let root = root.canonicalize().unwrap_or(root);
        debug!(root = %root.display(), "opened repository");

        Git2Repository { repo, root }
    }

    fn find_commit(&self, oid: Oid) -> Result<Commit<'_>> {
        self.repo
            .find_commit(oid)
            .map_err(|e| ReaperError::unresolved(oid.to_string(), e.message()))
    }
}

impl super::Repository for Git2Repository {
    fn root_path(&self) -> &Path {
        &self.root
    }

    fn list_branches(&self) -> Result<Vec<BranchRef>> {
        let branches = self
            .repo
            .branches(Some(BranchType::Local))
            .map_err(|e| ReaperError::enumeration(e.message()))?;

        let mut refs = Vec::new();
        for entry in branches {
            let (branch, _) = entry.map_err(|e| ReaperError::enumeration(e.message()))?;

            let name = match branch.name() {
                Ok(Some(name)) => name.to_string(),
                Ok(None) => {
                    warn!("skipping branch with a non UTF-8 name");
                    continue;
                }
                Err(e) => return Err(ReaperError::enumeration(e.message())),
            };

            let tip = branch
                .get()
                .resolve()
                .ok()
                .and_then(|reference| reference.target());
            match tip {
                Some(tip) => refs.push(BranchRef::new(name, tip)),
                None => warn!(branch = %name, "skipping branch without a commit target"),
            }
        }

        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        self.find_commit(ancestor)?;

        ancestry::is_reachable(ancestor, descendant, |oid| {
            let commit = self.find_commit(oid)?;
            Ok(commit.parent_ids().collect())
        })
    }

    fn commit_meta(&self, oid: Oid) -> Result<CommitMeta> {
        let commit = self.find_commit(oid)?;
        let author_name = commit.author().name().unwrap_or("unknown").to_string();

        Ok(CommitMeta {
            short_hash: short_hash(oid),
            author_name,
        })
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        let mut branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|e| ReaperError::delete(name, e.message()))?;

        if branch.is_head() {
            return Err(ReaperError::delete(name, "branch is currently checked out"));
        }

        branch
            .delete()
            .map_err(|e| ReaperError::delete(name, e.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_open_outside_repository() {
        let temp_dir = TempDir::new().unwrap();
        let result = Git2Repository::open_from(temp_dir.path());
        assert!(matches!(result, Err(ReaperError::NotARepository { .. })));
    }

    #[test]
    fn test_root_path_is_work_tree() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Git2Repository::open_from(&nested).unwrap();
        assert_eq!(repo.root_path(), temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_empty_repository_has_no_branches() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();

        let repo = Git2Repository::open_from(temp_dir.path()).unwrap();
        assert!(repo.list_branches().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_commit_is_unresolved() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();
        let repo = Git2Repository::open_from(temp_dir.path()).unwrap();

        let missing = Oid::from_bytes(&[7; 20]).unwrap();
        assert!(matches!(
            repo.commit_meta(missing),
            Err(ReaperError::ReferenceResolutionFailure { .. })
        ));
        assert!(matches!(
            repo.is_ancestor(missing, missing),
            Err(ReaperError::ReferenceResolutionFailure { .. })
        ));
    }

    #[test]
    fn test_delete_missing_branch_fails() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();
        let repo = Git2Repository::open_from(temp_dir.path()).unwrap();

        assert!(matches!(
            repo.delete_branch("nope"),
            Err(ReaperError::DeleteFailure { .. })
        ));
    }
}
