//! Command-line workflows
//!
//! The binary parses arguments with clap and hands a [ReleaseArgs] to
//! [ReleaseCommand]; nothing in here depends on clap.

pub mod release_command;

pub use release_command::{ReleaseArgs, ReleaseCommand, ReleaseOutcome};
