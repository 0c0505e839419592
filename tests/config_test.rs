// tests/config_test.rs
use release_tool::config::{load_config, ChangelogSource, Config, StrategyKind};
use release_tool::version::VersionBump;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.vcs.remote, "origin");
    assert_eq!(config.vcs.tag_prefix, "v");
    assert!(config.vcs.annotated);
    assert_eq!(config.versioning.strategy, StrategyKind::Conventional);
    assert_eq!(config.versioning.bump, VersionBump::Minor);
    assert_eq!(config.changelog.source, ChangelogSource::Commits);
    assert!(config
        .conventional_commits
        .breaking_change_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[vcs]
remote = "github"

[conventional_commits]
minor_keywords = ["add"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.vcs.remote, "github");
    assert_eq!(config.vcs.tag_prefix, "v");
    assert_eq!(config.conventional_commits.minor_keywords, vec!["add".to_string()]);
    assert!(config
        .conventional_commits
        .types
        .contains(&"feat".to_string()));
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/semantic_patch.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.vcs.remote, "upstream");
    assert_eq!(config.vcs.tag_prefix, "release-");
    assert!(!config.vcs.annotated);
    assert_eq!(config.versioning.strategy, StrategyKind::Semantic);
    assert_eq!(config.versioning.bump, VersionBump::Patch);
    assert_eq!(config.versioning.initial_version, "1.0.0");
    assert_eq!(config.changelog.source, ChangelogSource::PullRequests);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    assert!(load_config(Some("tests/fixtures/does_not_exist.toml")).is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[vcs\nremote = ").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
#[serial]
fn test_project_config_in_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("releasetool.toml"),
        "[vcs]\ntag_prefix = \"\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(temp_dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().vcs.tag_prefix, "");
}
