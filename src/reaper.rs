//! Merged-branch discovery and deletion
//!
//! A run moves through discovery of the main branches, merge analysis of
//! every other branch, confirmation and finally deletion. Structural
//! failures (enumeration, no main branch) abort the run; failures that
//! concern a single branch are logged or collected and the run continues.

use crate::error::{ReaperError, Result};
use crate::git::{BranchRef, Repository};
use tracing::{debug, info, warn};

/// A branch whose tip is already contained in a main branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    pub name: String,
    /// First main branch (in configured order) that contains the tip
    pub merged_into: String,
    pub short_hash: String,
    pub author_name: String,
}

/// Main branches present in the repository and the branches merged into them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPlan {
    pub main_branches: Vec<BranchRef>,
    pub candidates: Vec<MergeCandidate>,
}

impl CleanPlan {
    pub fn main_branch_names(&self) -> Vec<&str> {
        self.main_branches.iter().map(|b| b.name.as_str()).collect()
    }
}

/// A branch that could not be deleted
#[derive(Debug)]
pub struct FailedDeletion {
    pub branch: String,
    pub error: ReaperError,
}

/// Outcome of the deletion phase when the user confirmed
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    pub failed: Vec<FailedDeletion>,
}

impl DeletionReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Terminal state of [`Reaper::confirm_and_delete`]
#[derive(Debug)]
pub enum DeletionOutcome {
    /// There was nothing to delete; the prompt was never shown
    NothingToDelete,
    /// The user declined; no branch was touched
    Cancelled,
    Completed(DeletionReport),
}

/// Finds and removes branches merged into one of the main branches
pub struct Reaper<'a, R: Repository> {
    repo: &'a R,
    main_candidates: Vec<String>,
}

impl<'a, R: Repository> Reaper<'a, R> {
    /// Create a reaper over `repo`
    ///
    /// `main_candidates` is the ordered priority list of main branch names.
    /// Duplicate names are dropped, keeping the first occurrence.
    pub fn new(repo: &'a R, main_candidates: &[String]) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(main_candidates.len());
        for name in main_candidates {
            if !unique.contains(name) {
                unique.push(name.clone());
            }
        }

        Reaper {
            repo,
            main_candidates: unique,
        }
    }

    pub fn main_candidates(&self) -> &[String] {
        &self.main_candidates
    }

    /// Find which configured main branches exist, in configured order
    ///
    /// # Returns
    /// * `Ok(Vec<BranchRef>)` - The main branches present, never empty
    /// * `Err(NoMainBranchFound)` - If none of the candidates exist
    /// * `Err(EnumerationFailure)` - If branches cannot be listed
    pub fn discover_main_branches(&self) -> Result<Vec<BranchRef>> {
        let branches = self.repo.list_branches()?;

        let mains: Vec<BranchRef> = self
            .main_candidates
            .iter()
            .filter_map(|candidate| branches.iter().find(|b| &b.name == candidate))
            .cloned()
            .collect();

        if mains.is_empty() {
            return Err(ReaperError::NoMainBranchFound {
                candidates: self.main_candidates.clone(),
            });
        }

        for main in &mains {
            debug!(branch = %main.name, "found main branch");
        }
        Ok(mains)
    }

    /// Find every non-main branch whose tip is contained in a main branch
    ///
    /// Main branches are tried in the order given and the first match wins.
    /// An ancestry check that fails counts as "not merged" for that pair.
    pub fn find_merged_branches(&self, mains: &[BranchRef]) -> Result<Vec<MergeCandidate>> {
        let branches = self.repo.list_branches()?;
        let mut candidates = Vec::new();

        for branch in branches {
            if mains.iter().any(|main| main.name == branch.name) {
                continue;
            }

            let Some(main) = self.first_containing_main(&branch, mains) else {
                debug!(branch = %branch.name, "not merged");
                continue;
            };

            match self.repo.commit_meta(branch.tip) {
                Ok(meta) => {
                    debug!(branch = %branch.name, main = %main.name, "merged");
                    candidates.push(MergeCandidate {
                        name: branch.name,
                        merged_into: main.name.clone(),
                        short_hash: meta.short_hash,
                        author_name: meta.author_name,
                    });
                }
                Err(e) => {
                    warn!(branch = %branch.name, error = %e, "skipping merged branch without readable tip");
                }
            }
        }

        Ok(candidates)
    }

    fn first_containing_main<'m>(
        &self,
        branch: &BranchRef,
        mains: &'m [BranchRef],
    ) -> Option<&'m BranchRef> {
        mains
            .iter()
            .find(|main| match self.repo.is_ancestor(branch.tip, main.tip) {
                Ok(merged) => merged,
                Err(e) => {
                    warn!(
                        branch = %branch.name,
                        main = %main.name,
                        error = %e,
                        "failed to check if branch is merged"
                    );
                    false
                }
            })
    }

    /// Discover main branches and analyse every other branch against them
    pub fn plan(&self) -> Result<CleanPlan> {
        let main_branches = self.discover_main_branches()?;
        let candidates = self.find_merged_branches(&main_branches)?;
        Ok(CleanPlan {
            main_branches,
            candidates,
        })
    }

    /// Ask for confirmation, then delete every candidate
    ///
    /// `confirm` receives the number of pending deletions and is not called
    /// when there is nothing to delete. Deletion continues past individual
    /// failures; each candidate ends up in exactly one of the report lists.
    ///
    /// # Returns
    /// * `Ok(DeletionOutcome)` - Including cancellation and partial failure
    /// * `Err` - Only if `confirm` itself fails
    pub fn confirm_and_delete<F>(
        &self,
        candidates: &[MergeCandidate],
        confirm: F,
    ) -> Result<DeletionOutcome>
    where
        F: FnOnce(usize) -> Result<bool>,
    {
        if candidates.is_empty() {
            return Ok(DeletionOutcome::NothingToDelete);
        }

        if !confirm(candidates.len())? {
            info!("deletion cancelled by user");
            return Ok(DeletionOutcome::Cancelled);
        }

        let mut report = DeletionReport::default();
        for candidate in candidates {
            match self.repo.delete_branch(&candidate.name) {
                Ok(()) => {
                    info!(branch = %candidate.name, "deleted branch");
                    report.deleted.push(candidate.name.clone());
                }
                Err(error) => {
                    warn!(branch = %candidate.name, error = %error, "failed to delete branch");
                    report.failed.push(FailedDeletion {
                        branch: candidate.name.clone(),
                        error,
                    });
                }
            }
        }

        Ok(DeletionOutcome::Completed(report))
    }
}
