use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::version::VersionBump;

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "releasetool.toml";

/// Represents the complete configuration for release-tool.
///
/// Contains the VCS settings, the versioning strategy, conventional commit settings and
/// changelog options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub vcs: VcsConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings for the git repository the releases are tagged in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VcsConfig {
    /// Remote that release tags are pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Prefix put in front of the version to form the tag name
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Create annotated tags instead of lightweight ones
    #[serde(default = "default_true")]
    pub annotated: bool,
}

impl Default for VcsConfig {
    fn default() -> Self {
        VcsConfig {
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
            annotated: true,
        }
    }
}

/// Which strategy computes the next version when none is given.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Always apply the configured bump
    Semantic,
    /// Derive the bump from conventional commits since the last release
    #[default]
    Conventional,
}

fn default_bump() -> VersionBump {
    VersionBump::Minor
}

fn default_initial_version() -> String {
    "0.1.0".to_string()
}

/// Configuration for the versioning strategy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Bump used by the semantic strategy
    #[serde(default = "default_bump")]
    pub bump: VersionBump,

    /// Version of the first release when the repository has none
    #[serde(default = "default_initial_version")]
    pub initial_version: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            strategy: StrategyKind::default(),
            bump: default_bump(),
            initial_version: default_initial_version(),
        }
    }
}

/// Returns the default list of conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "test".to_string(),
        "chore".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "perf".to_string(),
    ]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Returns the default list of keywords that trigger major version bumps.
fn default_major_keywords() -> Vec<String> {
    vec!["breaking".to_string()]
}

/// Returns the default list of keywords that trigger minor version bumps.
fn default_minor_keywords() -> Vec<String> {
    vec!["feature".to_string(), "enhancement".to_string()]
}

/// Configuration for conventional commit analysis.
///
/// Defines the types, breaking change indicators, and keywords used to analyze commits
/// and determine version bumping strategy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    #[serde(default = "default_major_keywords")]
    pub major_keywords: Vec<String>,

    #[serde(default = "default_minor_keywords")]
    pub minor_keywords: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            types: default_commit_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
            major_keywords: default_major_keywords(),
            minor_keywords: default_minor_keywords(),
        }
    }
}

/// Where changelog entries are read from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChangelogSource {
    /// Every non-merge commit since the last release
    #[default]
    Commits,
    /// Merge commits of GitHub pull requests
    PullRequests,
}

/// Configuration for the changes shown before confirming a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub source: ChangelogSource,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            enabled: true,
            source: ChangelogSource::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasetool.toml` in current directory
/// 3. `.releasetool.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
