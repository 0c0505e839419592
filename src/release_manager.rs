use crate::error::{ReleaseError, Result};
use crate::vcs::VersionControlSystem;
use crate::versioning::Strategy;

/// Resolves release versions and records them in the version control system.
///
/// Has no interactive concerns; failures from the collaborators are returned unchanged.
pub struct ReleaseManager<'a> {
    vcs: &'a dyn VersionControlSystem,
    strategy: &'a dyn Strategy,
    created: Vec<String>,
}

impl<'a> ReleaseManager<'a> {
    pub fn new(vcs: &'a dyn VersionControlSystem, strategy: &'a dyn Strategy) -> Self {
        ReleaseManager {
            vcs,
            strategy,
            created: Vec::new(),
        }
    }

    /// Returns `version`, or asks the versioning strategy when it is `None`.
    pub fn resolve_version(&self, version: Option<&str>) -> Result<String> {
        match version {
            Some(version) => Ok(version.to_string()),
            None => {
                let next = self.strategy.get_next_version()?;
                tracing::debug!(version = %next, "resolved version from strategy");
                Ok(next)
            }
        }
    }

    /// Creates a release and returns the version that was created.
    pub fn create_release(&mut self, version: Option<&str>) -> Result<String> {
        let version = self.resolve_version(version)?;
        self.vcs.create_version(&version)?;
        self.created.push(version.clone());
        Ok(version)
    }

    /// Pushes a release created by this manager to the remote.
    ///
    /// Fails without touching the VCS when `version` was not created by
    /// [ReleaseManager::create_release] first.
    pub fn push_release(&self, version: &str) -> Result<()> {
        if !self.created.iter().any(|created| created == version) {
            return Err(ReleaseError::precondition(format!(
                "release {} has not been created",
                version
            )));
        }
        self.vcs.push_version(version)
    }

    /// How the operator can push `version` by hand, when the VCS knows.
    pub fn push_hint(&self, version: &str) -> Option<String> {
        self.vcs.push_hint(version)
    }
}
