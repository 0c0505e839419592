//! The interactive release workflow
//!
//! Resolves the version, shows the changes, then asks two questions:
//! create the release, and push it to the remote. Declining either one ends
//! the run normally; collaborator errors are returned to the caller.

use std::io::{BufRead, Write};

use crate::changelog::ChangelogGenerator;
use crate::error::Result;
use crate::release_manager::ReleaseManager;
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments but in a format suitable for the workflow, so it
/// can be called programmatically without depending on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseArgs {
    /// Version to release; resolved by the versioning strategy when `None`
    pub version: Option<String>,

    /// Answer "yes" to every confirmation
    pub assume_yes: bool,

    /// Show what would happen without creating or pushing anything
    pub dry_run: bool,
}

impl ReleaseArgs {
    pub fn with_version(version: impl Into<String>) -> Self {
        ReleaseArgs {
            version: Some(version.into()),
            ..ReleaseArgs::default()
        }
    }
}

/// How a release run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The operator declined to create the release
    Aborted,
    /// The release was created but not pushed
    Created { version: String },
    /// The release was created and pushed
    Pushed { version: String },
    /// Dry run; nothing was changed
    Planned { version: String },
}

/// Interactive entry point wrapping a [ReleaseManager]
pub struct ReleaseCommand<'a> {
    manager: ReleaseManager<'a>,
    changelog: Option<&'a dyn ChangelogGenerator>,
    offer_push: bool,
}

impl<'a> ReleaseCommand<'a> {
    /// Full workflow: show changes, confirm creation, offer to push.
    pub fn new(manager: ReleaseManager<'a>, changelog: &'a dyn ChangelogGenerator) -> Self {
        ReleaseCommand {
            manager,
            changelog: Some(changelog),
            offer_push: true,
        }
    }

    /// Single confirmation before the version is created; no changelog, no push.
    pub fn minimal(manager: ReleaseManager<'a>) -> Self {
        ReleaseCommand {
            manager,
            changelog: None,
            offer_push: false,
        }
    }

    /// Never offer to push the created release.
    pub fn without_push(mut self) -> Self {
        self.offer_push = false;
        self
    }

    /// Run the release workflow.
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - How the run ended, including operator-declined paths
    /// * `Err` - If the strategy, changelog, VCS or terminal I/O fails
    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        args: &ReleaseArgs,
        input: &mut R,
        output: &mut W,
    ) -> Result<ReleaseOutcome> {
        let version = self.manager.resolve_version(args.version.as_deref())?;

        let changes = match self.changelog {
            Some(changelog) => {
                let changes = changelog.get_changes()?;
                ui::display_changes(output, &changes)?;
                changes
            }
            None => Vec::new(),
        };

        if args.dry_run {
            ui::display_status(output, "Dry run:")?;
            ui::display_success(output, &format!("  Step 1: would create release {}", version))?;
            if self.offer_push {
                ui::display_success(output, "  Step 2: would ask whether to push to the remote")?;
            }
            if self.changelog.is_some() {
                ui::display_release_notes(output, &version, &changes)?;
            }
            return Ok(ReleaseOutcome::Planned { version });
        }

        let create = args.assume_yes
            || ui::confirm_action(input, output, &format!("Create release {}?", version))?;
        if !create {
            writeln!(output, "Release cancelled by user.")?;
            return Ok(ReleaseOutcome::Aborted);
        }

        ui::display_status(output, &format!("Creating release {}", version))?;
        let version = self.manager.create_release(Some(version.as_str()))?;
        ui::display_success(output, &format!("Created release {}", version))?;

        if !self.offer_push {
            return Ok(ReleaseOutcome::Created { version });
        }

        let push = args.assume_yes || ui::confirm_action(input, output, "Push to remote?")?;
        if !push {
            if let Some(hint) = self.manager.push_hint(&version) {
                ui::display_manual_push_instruction(output, &hint)?;
            }
            return Ok(ReleaseOutcome::Created { version });
        }

        ui::display_status(output, &format!("Pushing release {} to remote", version))?;
        self.manager.push_release(&version)?;
        ui::display_success(output, &format!("Pushed release {}", version))?;

        Ok(ReleaseOutcome::Pushed { version })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeEntry;
    use crate::vcs::RecordingVcs;
    use crate::versioning::Strategy;
    use std::cell::Cell;
    use std::io::Cursor;

    struct NextVersion(&'static str);

    impl Strategy for NextVersion {
        fn get_next_version(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct CountingChangelog {
        calls: Cell<usize>,
    }

    impl ChangelogGenerator for CountingChangelog {
        fn get_changes(&self) -> Result<Vec<ChangeEntry>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![ChangeEntry {
                title: "Add feature X".to_string(),
                hash: "abc1234".to_string(),
                pull_request: Some(7),
            }])
        }
    }

    fn run(
        command: &mut ReleaseCommand<'_>,
        args: &ReleaseArgs,
        answers: &str,
    ) -> (ReleaseOutcome, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = command.execute(args, &mut input, &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_changes_are_shown_before_the_question() {
        let vcs = RecordingVcs::new();
        let strategy = NextVersion("2.3.0");
        let changelog = CountingChangelog {
            calls: Cell::new(0),
        };
        let mut command = ReleaseCommand::new(ReleaseManager::new(&vcs, &strategy), &changelog);

        let (outcome, transcript) = run(&mut command, &ReleaseArgs::default(), "no\n");

        assert_eq!(outcome, ReleaseOutcome::Aborted);
        assert_eq!(changelog.calls.get(), 1);
        let change = transcript.find("#7: Add feature X").unwrap();
        let question = transcript.find("Create release 2.3.0?").unwrap();
        assert!(change < question);
    }

    #[test]
    fn test_declined_push_prints_hint() {
        let vcs = RecordingVcs::new();
        let strategy = NextVersion("2.3.0");
        let changelog = CountingChangelog {
            calls: Cell::new(0),
        };
        let mut command = ReleaseCommand::new(ReleaseManager::new(&vcs, &strategy), &changelog);

        let (outcome, transcript) =
            run(&mut command, &ReleaseArgs::with_version("1.2.0"), "yes\nno\n");

        assert_eq!(
            outcome,
            ReleaseOutcome::Created {
                version: "1.2.0".to_string()
            }
        );
        assert!(transcript.contains("git push origin v1.2.0"));
    }

    #[test]
    fn test_assume_yes_skips_prompts() {
        let vcs = RecordingVcs::new();
        let strategy = NextVersion("2.3.0");
        let mut command = ReleaseCommand {
            manager: ReleaseManager::new(&vcs, &strategy),
            changelog: None,
            offer_push: true,
        };

        let args = ReleaseArgs {
            assume_yes: true,
            ..ReleaseArgs::default()
        };
        let (outcome, transcript) = run(&mut command, &args, "");

        assert_eq!(
            outcome,
            ReleaseOutcome::Pushed {
                version: "2.3.0".to_string()
            }
        );
        assert!(!transcript.contains("(y/N)"));
        assert_eq!(vcs.created(), vec!["2.3.0".to_string()]);
        assert_eq!(vcs.pushed(), vec!["2.3.0".to_string()]);
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let vcs = RecordingVcs::new();
        let strategy = NextVersion("2.3.0");
        let changelog = CountingChangelog {
            calls: Cell::new(0),
        };
        let mut command = ReleaseCommand::new(ReleaseManager::new(&vcs, &strategy), &changelog);

        let args = ReleaseArgs {
            dry_run: true,
            ..ReleaseArgs::default()
        };
        let (outcome, transcript) = run(&mut command, &args, "yes\nyes\n");

        assert_eq!(
            outcome,
            ReleaseOutcome::Planned {
                version: "2.3.0".to_string()
            }
        );
        assert!(vcs.calls().is_empty());
        assert!(transcript.contains("## 2.3.0"));
        assert!(!transcript.contains("(y/N)"));
    }

    #[test]
    fn test_without_push_never_asks() {
        let vcs = RecordingVcs::new();
        let strategy = NextVersion("2.3.0");
        let changelog = CountingChangelog {
            calls: Cell::new(0),
        };
        let mut command =
            ReleaseCommand::new(ReleaseManager::new(&vcs, &strategy), &changelog).without_push();

        let (outcome, transcript) = run(&mut command, &ReleaseArgs::default(), "yes\nyes\n");

        assert_eq!(
            outcome,
            ReleaseOutcome::Created {
                version: "2.3.0".to_string()
            }
        );
        assert!(!transcript.contains("Push to remote?"));
        assert!(vcs.pushed().is_empty());
    }
}
