//! Changes recorded since the last release
//!
//! The [ChangelogGenerator] trait is what the release command shows the
//! operator before asking for confirmation. [GitChangelogGenerator] reads the
//! entries from the commits the VCS reports since the last version.

use std::fmt;

use regex::Regex;

use crate::config::{ChangelogConfig, ChangelogSource};
use crate::error::{ReleaseError, Result};
use crate::vcs::{CommitInfo, VersionControlSystem};

/// A single change included in a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub title: String,
    pub hash: String,
    pub pull_request: Option<u32>,
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pull_request {
            Some(number) => write!(f, "#{}: {}", number, self.title),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Produces the list of changes since the last release
pub trait ChangelogGenerator {
    fn get_changes(&self) -> Result<Vec<ChangeEntry>>;
}

/// Changelog built from the git history between the last release and HEAD
pub struct GitChangelogGenerator<'a> {
    vcs: &'a dyn VersionControlSystem,
    source: ChangelogSource,
}

impl<'a> GitChangelogGenerator<'a> {
    pub fn new(vcs: &'a dyn VersionControlSystem, config: &ChangelogConfig) -> Self {
        GitChangelogGenerator {
            vcs,
            source: config.source,
        }
    }
}

impl ChangelogGenerator for GitChangelogGenerator<'_> {
    fn get_changes(&self) -> Result<Vec<ChangeEntry>> {
        let last = self.vcs.get_last_version()?;
        let commits = self.vcs.get_commits_since(last.as_deref())?;

        let entries = match self.source {
            ChangelogSource::Commits => commits
                .iter()
                .filter(|commit| !commit.is_merge)
                .map(|commit| ChangeEntry {
                    title: commit.summary().to_string(),
                    hash: commit.hash.clone(),
                    pull_request: None,
                })
                .collect(),
            ChangelogSource::PullRequests => pull_request_entries(&commits)?,
        };

        tracing::debug!(
            since = ?last,
            commits = commits.len(),
            entries = entries.len(),
            "collected changes"
        );
        Ok(entries)
    }
}

/// Entries for GitHub "Merge pull request #N from owner/branch" commits.
///
/// The title is the first non-empty line after the subject; the subject is
/// used when the merge has no body.
fn pull_request_entries(commits: &[CommitInfo]) -> Result<Vec<ChangeEntry>> {
    let re = Regex::new(r"^Merge pull request #(\d+) from \S+")
        .map_err(|e| ReleaseError::changelog(format!("Invalid pull request pattern: {}", e)))?;

    let mut entries = Vec::new();
    for commit in commits {
        let Some(captures) = re.captures(commit.summary()) else {
            continue;
        };
        let Ok(number) = captures[1].parse::<u32>() else {
            continue;
        };

        let title = commit
            .message
            .lines()
            .skip(1)
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_else(|| commit.summary())
            .to_string();

        entries.push(ChangeEntry {
            title,
            hash: commit.hash.clone(),
            pull_request: Some(number),
        });
    }

    Ok(entries)
}

/// Renders a Markdown release-notes section for `version`.
pub fn render_markdown(version: &str, entries: &[ChangeEntry]) -> String {
    let mut notes = format!("## {}\n\n", version);

    if entries.is_empty() {
        notes.push_str("No changes.\n");
    }

    for entry in entries {
        notes.push_str(&format!("- {}\n", entry));
    }

    notes
}
