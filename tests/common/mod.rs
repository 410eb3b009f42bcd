#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A throwaway repository whose history is built commit by commit
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Initialise an empty repository whose HEAD points at `main`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &options).expect("Could not init git repo");

        TestRepo { dir, repo }
    }

    /// Create a commit with an empty tree on top of `parents`
    pub fn commit(&self, message: &str, author: &str, parents: &[Oid]) -> Oid {
        let signature = Signature::now(author, "test@example.com").expect("Could not create sig");
        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(None, &signature, &signature, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Point a local branch at `oid`, creating or moving it
    pub fn branch(&self, name: &str, oid: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), oid, true, "test")
            .expect("Could not set branch");
    }

    pub fn checkout(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Could not move HEAD");
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.repo
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }

    /// The standard scenario:
    ///
    /// ```text
    /// base ── m1 ───────── merge   (main)
    ///    │ \               /
    ///    │  └─ a1 ────────┘        (feature-a)
    ///    ├─ b1                     (feature-b)
    ///    └─ (staging = m1)
    /// ```
    pub fn scenario() -> (Self, Scenario) {
        let repo = TestRepo::new();
        let base = repo.commit("initial commit", "Alice", &[]);
        let m1 = repo.commit("main work", "Alice", &[base]);
        let a1 = repo.commit("feature a", "Bob", &[base]);
        let b1 = repo.commit("feature b", "Carol", &[base]);
        let merge = repo.commit("Merge feature-a", "Alice", &[m1, a1]);

        repo.branch("main", merge);
        repo.branch("staging", m1);
        repo.branch("feature-a", a1);
        repo.branch("feature-b", b1);

        (
            repo,
            Scenario {
                base,
                m1,
                a1,
                b1,
                merge,
            },
        )
    }
}

pub struct Scenario {
    pub base: Oid,
    pub m1: Oid,
    pub a1: Oid,
    pub b1: Oid,
    pub merge: Oid,
}
