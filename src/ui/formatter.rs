//! Pure formatting functions for UI output.
//!
//! Line builders (`format_*`) are pure and tested; `display_*` functions
//! print them.

use console::style;
use std::path::Path;

use crate::git::BranchRef;
use crate::reaper::{DeletionReport, FailedDeletion, MergeCandidate};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_repository(root: &Path) {
    display_status(&format!("Repository: {}", root.display()));
}

pub fn format_main_branches(mains: &[BranchRef]) -> String {
    let names: Vec<&str> = mains.iter().map(|b| b.name.as_str()).collect();
    format!("Main branches: {}", names.join(", "))
}

pub fn display_main_branches(mains: &[BranchRef]) {
    display_status(&format_main_branches(mains));
}

/// One bullet line describing a merge candidate.
pub fn format_candidate(candidate: &MergeCandidate) -> String {
    format!(
        "{} (merged into {}) - {} by {}",
        candidate.name, candidate.merged_into, candidate.short_hash, candidate.author_name
    )
}

pub fn format_failure(failure: &FailedDeletion) -> String {
    format!("{}: {}", failure.branch, failure.error)
}

/// Display the merged branches that would be deleted.
pub fn display_candidates(candidates: &[MergeCandidate]) {
    println!(
        "\n{}",
        style(format!("Found {} merged branch(es):", candidates.len())).bold()
    );
    for candidate in candidates {
        println!("  • {}", format_candidate(candidate));
    }
}

pub fn display_nothing_to_clean() {
    display_success("No merged branches found - your repository is already clean!");
}

pub fn display_cancelled() {
    println!("\n{} Operation cancelled by user", style("✗").red());
}

pub fn display_dry_run(count: usize) {
    display_status(&format!(
        "Dry run: {} branch(es) would be deleted, nothing was changed",
        count
    ));
}

/// Display which branches were deleted and which could not be.
pub fn display_report(report: &DeletionReport) {
    if !report.deleted.is_empty() {
        println!(
            "\n{} Deleted {} branch(es):",
            style("✓").green(),
            report.deleted.len()
        );
        for name in &report.deleted {
            println!("  • {}", name);
        }
    }

    if !report.failed.is_empty() {
        println!(
            "\n{} Failed to delete {} branch(es):",
            style("✗").red(),
            report.failed.len()
        );
        for failure in &report.failed {
            println!("  • {}", format_failure(failure));
        }
    }
}
