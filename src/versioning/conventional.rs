use crate::config::ConventionalCommitsConfig;
use crate::conventional::determine_version_bump;
use crate::error::{ReleaseError, Result};
use crate::vcs::VersionControlSystem;
use crate::versioning::semantic::next_version;
use crate::versioning::Strategy;

/// Derives the bump from the conventional commits made since the last release.
pub struct ConventionalVersioning<'a> {
    vcs: &'a dyn VersionControlSystem,
    config: ConventionalCommitsConfig,
    initial_version: String,
}

impl<'a> ConventionalVersioning<'a> {
    pub fn new(
        vcs: &'a dyn VersionControlSystem,
        config: ConventionalCommitsConfig,
        initial_version: impl Into<String>,
    ) -> Self {
        ConventionalVersioning {
            vcs,
            config,
            initial_version: initial_version.into(),
        }
    }
}

impl Strategy for ConventionalVersioning<'_> {
    fn get_next_version(&self) -> Result<String> {
        let last = self.vcs.get_last_version()?;
        let messages: Vec<String> = self
            .vcs
            .get_commits_since(last.as_deref())?
            .into_iter()
            .map(|commit| commit.message)
            .collect();

        if let Some(last) = last.as_deref() {
            if messages.is_empty() {
                return Err(ReleaseError::version(format!(
                    "No commits since {}, nothing to release",
                    last
                )));
            }
        }

        let bump = determine_version_bump(&messages, &self.config);
        tracing::debug!(commits = messages.len(), %bump, "analyzed commits");

        next_version(self.vcs, bump, &self.initial_version)
    }
}
