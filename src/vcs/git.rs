use std::path::{Path, PathBuf};

use git2::{Repository, Sort};

use crate::config::VcsConfig;
use crate::error::{ReleaseError, Result};
use crate::vcs::{CommitInfo, VersionControlSystem};
use crate::version::parse_version;

/// Git-backed version control: a release is a tag at HEAD.
///
/// Tags are named `<tag_prefix><version>` and pushed to a single configured remote.
pub struct GitVcs {
    repo: Repository,
    remote: String,
    tag_prefix: String,
    annotated: bool,
}

impl GitVcs {
    /// Open the git repository containing `path`.
    ///
    /// # Returns
    /// * `Ok(GitVcs)` - Repository discovered at or above `path`
    /// * `Err` - If `path` is not inside a git repository
    pub fn open<P: AsRef<Path>>(path: P, config: &VcsConfig) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self::from_git2(repo, config))
    }

    /// Create from an existing `git2::Repository`
    pub fn from_git2(repo: Repository, config: &VcsConfig) -> Self {
        GitVcs {
            repo,
            remote: config.remote.clone(),
            tag_prefix: config.tag_prefix.clone(),
            annotated: config.annotated,
        }
    }

    /// Tag name used for `version`.
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }

    fn tag_reference(&self, version: &str) -> String {
        format!("refs/tags/{}", self.tag_name(version))
    }
}

fn cannot_create(tag_name: &str, e: git2::Error) -> ReleaseError {
    ReleaseError::tag(format!("Cannot create tag '{}': {}", tag_name, e))
}

/// Credentials offered to the remote during a push.
///
/// libgit2 asks again after every rejected credential. Each SSH key, the agent
/// and the default credential are offered once, then the push fails.
struct CredentialAttempts {
    keys: std::vec::IntoIter<PathBuf>,
    tried_agent: bool,
    tried_default: bool,
}

impl CredentialAttempts {
    fn new(home: Option<PathBuf>) -> Self {
        let keys: Vec<PathBuf> = home
            .map(|home| {
                ["id_ed25519", "id_rsa", "id_ecdsa"]
                    .iter()
                    .map(|key| home.join(".ssh").join(key))
                    .filter(|path| path.exists())
                    .collect()
            })
            .unwrap_or_default();

        CredentialAttempts {
            keys: keys.into_iter(),
            tried_agent: false,
            tried_default: false,
        }
    }

    fn next(
        &mut self,
        username: &str,
        allowed_types: git2::CredentialType,
    ) -> std::result::Result<git2::Cred, git2::Error> {
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            for path in self.keys.by_ref() {
                if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                    tracing::debug!(key = %path.display(), "offering ssh key");
                    return Ok(cred);
                }
            }

            if !self.tried_agent {
                self.tried_agent = true;
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    tracing::debug!("offering ssh agent credentials");
                    return Ok(cred);
                }
            }
        }

        if !self.tried_default {
            self.tried_default = true;
            return git2::Cred::default();
        }

        Err(git2::Error::from_str(
            "authentication failed: every available credential was rejected",
        ))
    }
}

impl VersionControlSystem for GitVcs {
    fn create_version(&self, version: &str) -> Result<()> {
        let tag_name = self.tag_name(version);

        if self.repo.find_reference(&self.tag_reference(version)).is_ok() {
            return Err(ReleaseError::tag(format!(
                "Tag '{}' already exists",
                tag_name
            )));
        }

        let head = self.repo.head()?.peel_to_commit()?;

        if self.annotated {
            let tagger = self.repo.signature()?;
            self.repo
                .tag(
                    &tag_name,
                    head.as_object(),
                    &tagger,
                    &format!("Release {}", version),
                    false,
                )
                .map_err(|e| cannot_create(&tag_name, e))?;
        } else {
            self.repo
                .tag_lightweight(&tag_name, head.as_object(), false)
                .map_err(|e| cannot_create(&tag_name, e))?;
        }

        tracing::info!(tag = %tag_name, commit = %head.id(), "created release tag");
        Ok(())
    }

    fn push_version(&self, version: &str) -> Result<()> {
        let tag_name = self.tag_name(version);
        let mut remote = self.repo.find_remote(&self.remote).map_err(|e| {
            ReleaseError::remote(format!("Cannot find remote '{}': {}", self.remote, e))
        })?;

        let mut attempts = CredentialAttempts::new(dirs::home_dir());
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            attempts.next(username_from_url.unwrap_or("git"), allowed_types)
        });

        // A rejected ref does not fail `push` by itself.
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("{0}:{0}", self.tag_reference(version));
        match remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            Ok(()) => {
                tracing::info!(tag = %tag_name, remote = %self.remote, "pushed release tag");
                Ok(())
            }
            Err(e) if e.class() == git2::ErrorClass::Net => Err(ReleaseError::remote(format!(
                "Network error while pushing '{}': {}",
                tag_name, e
            ))),
            Err(e) => Err(ReleaseError::remote(format!(
                "Failed to push tag '{}' to '{}': {}",
                tag_name, self.remote, e
            ))),
        }
    }

    fn get_last_version(&self) -> Result<Option<String>> {
        let tags = self.repo.tag_names(None)?;

        let last = tags
            .iter()
            .flatten()
            .filter_map(|tag| tag.strip_prefix(self.tag_prefix.as_str()))
            .filter_map(|version| parse_version(version).ok().map(|parsed| (parsed, version)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, version)| version.to_string());

        tracing::debug!(last_version = ?last, "looked up last released version");
        Ok(last)
    }

    fn get_commits_since(&self, version: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push_head()?;

        if let Some(version) = version {
            let tagged = self
                .repo
                .find_reference(&self.tag_reference(version))
                .and_then(|reference| reference.peel_to_commit())
                .map_err(|e| {
                    ReleaseError::tag(format!(
                        "Cannot resolve tag '{}': {}",
                        self.tag_name(version),
                        e
                    ))
                })?;
            revwalk.hide(tagged.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                message: commit.message().unwrap_or("(empty message)").to_string(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
                is_merge: commit.parent_count() > 1,
            });
        }

        Ok(commits)
    }

    fn push_hint(&self, version: &str) -> Option<String> {
        Some(format!("git push {} {}", self.remote, self.tag_name(version)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, dir: &Path, content: &str, message: &str) -> git2::Oid {
        fs::write(dir.join("README.md"), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<git2::Commit> = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup() -> (TempDir, GitVcs) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        commit_file(&repo, dir.path(), "one\n", "Initial commit");
        let vcs = GitVcs::from_git2(repo, &VcsConfig::default());
        (dir, vcs)
    }

    #[test]
    fn test_tag_name_uses_prefix() {
        let (_dir, vcs) = setup();
        assert_eq!(vcs.tag_name("1.2.0"), "v1.2.0");
        assert_eq!(
            vcs.push_hint("1.2.0"),
            Some("git push origin v1.2.0".to_string())
        );
    }

    #[test]
    fn test_create_version_and_last_version() {
        let (_dir, vcs) = setup();
        assert_eq!(vcs.get_last_version().unwrap(), None);

        vcs.create_version("1.2.0").unwrap();
        assert_eq!(vcs.get_last_version().unwrap(), Some("1.2.0".to_string()));
    }

    #[test]
    fn test_create_existing_version_fails() {
        let (_dir, vcs) = setup();
        vcs.create_version("1.0.0").unwrap();

        let result = vcs.create_version("1.0.0");
        assert!(matches!(result, Err(ReleaseError::Tag(_))));
    }

    #[test]
    fn test_last_version_is_highest_semver() {
        let (dir, vcs) = setup();
        vcs.create_version("1.9.0").unwrap();
        commit_file(&vcs.repo, dir.path(), "two\n", "fix: two");
        vcs.create_version("1.10.0").unwrap();

        let head = vcs.repo.head().unwrap().peel_to_commit().unwrap();
        vcs.repo
            .tag_lightweight("not-a-release", head.as_object(), false)
            .unwrap();

        assert_eq!(vcs.get_last_version().unwrap(), Some("1.10.0".to_string()));
    }

    #[test]
    fn test_commits_since_version() {
        let (dir, vcs) = setup();
        vcs.create_version("0.1.0").unwrap();
        commit_file(&vcs.repo, dir.path(), "two\n", "feat: second");
        commit_file(&vcs.repo, dir.path(), "three\n", "fix: third");

        let commits = vcs.get_commits_since(Some("0.1.0")).unwrap();
        let summaries: Vec<&str> = commits.iter().map(|c| c.summary()).collect();
        assert_eq!(summaries, vec!["feat: second", "fix: third"]);

        let all = vcs.get_commits_since(None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].summary(), "Initial commit");
    }

    #[test]
    fn test_commits_since_unknown_version_fails() {
        let (_dir, vcs) = setup();
        let result = vcs.get_commits_since(Some("9.9.9"));
        assert!(matches!(result, Err(ReleaseError::Tag(_))));
    }

    #[test]
    fn test_credentials_run_out_instead_of_repeating() {
        let home = TempDir::new().unwrap();
        fs::create_dir(home.path().join(".ssh")).unwrap();
        fs::write(home.path().join(".ssh").join("id_ed25519"), "not a real key").unwrap();

        let mut attempts = CredentialAttempts::new(Some(home.path().to_path_buf()));
        let offered = (0..10)
            .filter(|_| attempts.next("git", git2::CredentialType::SSH_KEY).is_ok())
            .count();

        // One key file, the agent and the default credential at most.
        assert!(offered <= 3, "offered {} credentials", offered);
        assert!(attempts.next("git", git2::CredentialType::SSH_KEY).is_err());
    }

    #[test]
    fn test_credentials_without_home_offer_default_once() {
        let mut attempts = CredentialAttempts::new(None);
        assert!(attempts.next("git", git2::CredentialType::DEFAULT).is_ok());
        assert!(attempts.next("git", git2::CredentialType::DEFAULT).is_err());
    }

    #[test]
    fn test_push_without_remote_fails() {
        let (_dir, vcs) = setup();
        vcs.create_version("1.0.0").unwrap();
        let result = vcs.push_version("1.0.0");
        assert!(matches!(result, Err(ReleaseError::Remote(_))));
    }
}
