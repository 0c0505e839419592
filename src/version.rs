use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};

/// Represents the type of semantic version bump to apply.
///
/// Used to determine how to increment version numbers based on commit analysis
/// or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

impl FromStr for VersionBump {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(format!(
                "unknown bump '{}', expected major, minor or patch",
                other
            )),
        }
    }
}

/// Parses a semantic version string such as "1.2.3" or "2.0.0-rc.1".
pub fn parse_version(version: &str) -> Result<Version> {
    Version::parse(version.trim())
        .map_err(|e| ReleaseError::version(format!("Invalid version '{}': {}", version, e)))
}

/// Bumps a version according to the specified bump type.
///
/// Increments the appropriate component and resets lower components to 0:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// A pre-release is finalised instead of incremented when the bump does not go past it,
/// so `1.0.0-rc.1` bumped as patch becomes `1.0.0`. Build metadata is always dropped.
pub fn bump_version(version: &Version, bump: VersionBump) -> Version {
    let mut next = version.clone();
    let finalise = !version.pre.is_empty();
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;

    match bump {
        VersionBump::Major => {
            if !(finalise && version.minor == 0 && version.patch == 0) {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
        }
        VersionBump::Minor => {
            if !(finalise && version.patch == 0) {
                next.minor += 1;
            }
            next.patch = 0;
        }
        VersionBump::Patch => {
            if !finalise {
                next.patch += 1;
            }
        }
    }
    next
}
