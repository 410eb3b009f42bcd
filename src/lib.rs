pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod reaper;
pub mod ui;

pub use error::{ReaperError, Result};
pub use reaper::{CleanPlan, DeletionOutcome, DeletionReport, MergeCandidate, Reaper};
