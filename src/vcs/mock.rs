use std::cell::RefCell;

use crate::error::{ReleaseError, Result};
use crate::vcs::{CommitInfo, VersionControlSystem};

/// A mutating call received by [RecordingVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    CreateVersion(String),
    PushVersion(String),
}

/// Fake version control system that records calls instead of touching a repository
#[derive(Debug, Default)]
pub struct RecordingVcs {
    calls: RefCell<Vec<VcsCall>>,
    last_version: Option<String>,
    commits: Vec<CommitInfo>,
    fail_create: Option<String>,
    fail_push: Option<String>,
}

impl RecordingVcs {
    /// Create a new fake with no versions and no commits
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `version` is the last released version
    pub fn with_last_version(mut self, version: impl Into<String>) -> Self {
        self.last_version = Some(version.into());
        self
    }

    /// Add a commit made since the last version
    pub fn with_commit(mut self, hash: impl Into<String>, message: impl Into<String>) -> Self {
        self.commits.push(CommitInfo {
            hash: hash.into(),
            message: message.into(),
            author: "Test Author".to_string(),
            is_merge: false,
        });
        self
    }

    /// Add a merge commit made since the last version
    pub fn with_merge_commit(
        mut self,
        hash: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.commits.push(CommitInfo {
            hash: hash.into(),
            message: message.into(),
            author: "Test Author".to_string(),
            is_merge: true,
        });
        self
    }

    /// Make `create_version` fail with `message`
    pub fn failing_create(mut self, message: impl Into<String>) -> Self {
        self.fail_create = Some(message.into());
        self
    }

    /// Make `push_version` fail with `message`
    pub fn failing_push(mut self, message: impl Into<String>) -> Self {
        self.fail_push = Some(message.into());
        self
    }

    /// Every mutating call received so far, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    /// Versions passed to `create_version`
    pub fn created(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                VcsCall::CreateVersion(version) => Some(version.clone()),
                VcsCall::PushVersion(_) => None,
            })
            .collect()
    }

    /// Versions passed to `push_version`
    pub fn pushed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                VcsCall::PushVersion(version) => Some(version.clone()),
                VcsCall::CreateVersion(_) => None,
            })
            .collect()
    }
}

impl VersionControlSystem for RecordingVcs {
    fn create_version(&self, version: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::CreateVersion(version.to_string()));
        match &self.fail_create {
            Some(message) => Err(ReleaseError::tag(message.clone())),
            None => Ok(()),
        }
    }

    fn push_version(&self, version: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(VcsCall::PushVersion(version.to_string()));
        match &self.fail_push {
            Some(message) => Err(ReleaseError::remote(message.clone())),
            None => Ok(()),
        }
    }

    fn get_last_version(&self) -> Result<Option<String>> {
        Ok(self.last_version.clone())
    }

    fn get_commits_since(&self, _version: Option<&str>) -> Result<Vec<CommitInfo>> {
        Ok(self.commits.clone())
    }

    fn push_hint(&self, version: &str) -> Option<String> {
        Some(format!("git push origin v{}", version))
    }
}
