//! Pure formatting functions for UI output.
//!
//! Everything except [display_error] writes to the writer it is given, which is
//! stdout for the binary and a buffer in tests.

use std::io::{self, Write};

use console::style;

use crate::changelog::{render_markdown, ChangeEntry};

/// Format and print an error message in red on stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Styled against the stderr terminal.
fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().for_stderr(), message)
}

/// Format and print a success message with green checkmark.
pub fn display_success<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✓").green(), message)
}

/// Format and print a status message with yellow arrow.
pub fn display_status<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("→").yellow(), message)
}

/// Display the changes going into a release.
///
/// Shows up to 20 entries; if more exist, displays the count of remaining ones.
pub fn display_changes<W: Write>(out: &mut W, changes: &[ChangeEntry]) -> io::Result<()> {
    if changes.is_empty() {
        return writeln!(
            out,
            "\n{} No changes since the last release",
            style("⚠").yellow()
        );
    }

    writeln!(
        out,
        "\n{}",
        style(format!("Changes since the last release ({}):", changes.len())).bold()
    )?;

    for change in changes.iter().take(20) {
        writeln!(out, "  - {}", change)?;
    }

    if changes.len() > 20 {
        writeln!(out, "  ... and {} more changes", changes.len() - 20)?;
    }

    Ok(())
}

/// Display the Markdown release notes for `version`.
pub fn display_release_notes<W: Write>(
    out: &mut W,
    version: &str,
    changes: &[ChangeEntry],
) -> io::Result<()> {
    writeln!(out, "\n{}", style("Release notes:").bold())?;
    write!(out, "{}", render_markdown(version, changes))
}

/// Display manual push instruction for a release.
///
/// # Arguments
/// * `hint` - The command that pushes the release (e.g. "git push origin v1.2.0")
pub fn display_manual_push_instruction<W: Write>(out: &mut W, hint: &str) -> io::Result<()> {
    writeln!(
        out,
        "\n{} To push this release later, run:\n  {}",
        style("→").yellow(),
        style(hint).cyan()
    )
}
