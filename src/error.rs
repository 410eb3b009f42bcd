use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for git-reaper operations
#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("Not a git repository (or any parent up to the filesystem root): {}", path.display())]
    NotARepository { path: PathBuf },

    #[error("Failed to open repository: {0}")]
    OpenFailure(String),

    #[error("Failed to enumerate branches: {0}")]
    EnumerationFailure(String),

    #[error("Cannot resolve '{reference}': {reason}")]
    ReferenceResolutionFailure { reference: String, reason: String },

    #[error("No main branches found (looking for: {})", candidates.join(", "))]
    NoMainBranchFound { candidates: Vec<String> },

    #[error("Failed to delete branch '{branch}': {reason}")]
    DeleteFailure { branch: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-reaper
pub type Result<T> = std::result::Result<T, ReaperError>;

impl ReaperError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReaperError::Config(msg.into())
    }

    pub fn enumeration(msg: impl Into<String>) -> Self {
        ReaperError::EnumerationFailure(msg.into())
    }

    /// Create a resolution error for a reference or commit id
    pub fn unresolved(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        ReaperError::ReferenceResolutionFailure {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Create a deletion error for a branch
    pub fn delete(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        ReaperError::DeleteFailure {
            branch: branch.into(),
            reason: reason.into(),
        }
    }
}
