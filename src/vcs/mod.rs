//! Version control abstraction layer
//!
//! This module provides a trait-based abstraction over the repository that
//! releases are recorded in, allowing the release workflow to run against a
//! real git repository or a recording fake in tests.
//!
//! # Overview
//!
//! - [git::GitVcs]: the real implementation using the `git2` crate
//! - [mock::RecordingVcs]: a fake that records every call for verification
//!
//! Code driving a release should depend on [VersionControlSystem] rather than
//! a concrete implementation.

pub mod git;
pub mod mock;

pub use git::GitVcs;
pub use mock::{RecordingVcs, VcsCall};

use crate::error::Result;

/// Commit information for changelog and version analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
    /// Whether the commit has more than one parent
    pub is_merge: bool,
}

impl CommitInfo {
    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }
}

/// Operations the release workflow needs from a version control system.
///
/// Versions are passed as plain version strings ("1.2.0"); how they map onto
/// tags is up to the implementation.
///
/// ## Error Handling
///
/// Implementations map their underlying errors (like `git2::Error`) to the
/// appropriate [crate::error::ReleaseError] variants. Callers propagate them
/// unchanged.
pub trait VersionControlSystem {
    /// Record a new version in the repository.
    ///
    /// # Returns
    /// * `Ok(())` - The version was created
    /// * `Err` - If the version already exists or the repository rejects it
    fn create_version(&self, version: &str) -> Result<()>;

    /// Publish a previously created version to the remote.
    ///
    /// # Returns
    /// * `Ok(())` - The version was pushed
    /// * `Err` - If the remote is missing, unreachable, or rejects the push
    fn push_version(&self, version: &str) -> Result<()>;

    /// The highest version released so far, if any.
    fn get_last_version(&self) -> Result<Option<String>>;

    /// Commits made after `version` (or all commits when `None`), oldest first.
    fn get_commits_since(&self, version: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Command an operator can run to push `version` by hand.
    fn push_hint(&self, _version: &str) -> Option<String> {
        None
    }
}
