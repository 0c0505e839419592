use crate::error::Result;
use crate::vcs::VersionControlSystem;
use crate::version::{bump_version, parse_version, VersionBump};
use crate::versioning::Strategy;

/// Bumps the last released version by a fixed increment.
pub struct SemanticVersioning<'a> {
    vcs: &'a dyn VersionControlSystem,
    bump: VersionBump,
    initial_version: String,
}

impl<'a> SemanticVersioning<'a> {
    pub fn new(
        vcs: &'a dyn VersionControlSystem,
        bump: VersionBump,
        initial_version: impl Into<String>,
    ) -> Self {
        SemanticVersioning {
            vcs,
            bump,
            initial_version: initial_version.into(),
        }
    }
}

impl Strategy for SemanticVersioning<'_> {
    fn get_next_version(&self) -> Result<String> {
        next_version(self.vcs, self.bump, &self.initial_version)
    }
}

/// Applies `bump` to the last version, or returns `initial_version` for the first release.
pub(crate) fn next_version(
    vcs: &dyn VersionControlSystem,
    bump: VersionBump,
    initial_version: &str,
) -> Result<String> {
    match vcs.get_last_version()? {
        Some(last) => {
            let next = bump_version(&parse_version(&last)?, bump);
            tracing::debug!(%last, %bump, %next, "computed next version");
            Ok(next.to_string())
        }
        None => {
            // Validate so a bad config fails before anything is tagged.
            let initial = parse_version(initial_version)?;
            tracing::debug!(%initial, "no previous release, using initial version");
            Ok(initial.to_string())
        }
    }
}
