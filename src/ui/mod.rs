//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_candidates, display_cancelled, display_dry_run, display_error,
    display_main_branches, display_nothing_to_clean, display_report, display_repository,
    display_status, display_success,
};

/// Asks on the terminal whether `count` merged branches should be deleted.
///
/// Reads one line from stdin. Accepts "y" or "yes" (case-insensitive) as
/// confirmation; anything else, including an empty line, declines.
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise
/// * `Err` - If stdin cannot be read or is already closed
pub fn confirm_deletion(count: usize) -> Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt_confirmation(&mut stdin.lock(), &mut stdout.lock(), count)
}

/// Prompt/answer exchange behind [`confirm_deletion`] over arbitrary streams.
pub fn prompt_confirmation<R, W>(input: &mut R, output: &mut W, count: usize) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(
        output,
        "\nDo you want to delete {} merged branch(es)? [y/N]: ",
        count
    )?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on stdin").into());
    }

    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}
