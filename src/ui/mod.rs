//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling
//!
//! Prompts read from any `BufRead` and write to any `Write`, so the release
//! command runs the same against a terminal or a scripted list of answers.

use std::io::{BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_changes, display_error, display_manual_push_instruction, display_release_notes,
    display_status, display_success,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter or the input is exhausted.
///
/// # Arguments
/// * `input` - Where the answer is read from
/// * `output` - Where the prompt is written to
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, end of input, or "n"/"no")
/// * `Err` - If reading or writing fails
pub fn confirm_action<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer)?;
    if read == 0 {
        // Keep the transcript readable when stdin is closed.
        writeln!(output)?;
        return Ok(false);
    }

    Ok(is_yes(&answer))
}

/// Whether an answer counts as "yes".
pub fn is_yes(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}
