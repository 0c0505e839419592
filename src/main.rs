use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_tool::changelog::GitChangelogGenerator;
use release_tool::cli::{ReleaseArgs, ReleaseCommand, ReleaseOutcome};
use release_tool::config;
use release_tool::ui;
use release_tool::vcs::GitVcs;
use release_tool::version::VersionBump;
use release_tool::versioning::strategy_from_config;
use release_tool::ReleaseManager;

#[derive(clap::Parser)]
#[command(
    name = "release",
    version,
    about = "Tag a new release and optionally push it to the remote"
)]
struct Args {
    #[arg(
        value_name = "VERSION",
        help = "Version to release (computed by the versioning strategy when omitted)"
    )]
    release_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Remote to push the release to")]
    remote: Option<String>,

    #[arg(short, long, help = "Bump the last version by major, minor or patch")]
    bump: Option<VersionBump>,

    #[arg(short, long, help = "Answer yes to every confirmation")]
    yes: bool,

    #[arg(long, help = "Create the release locally without offering to push it")]
    no_push: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Show debug logging")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(remote) = args.remote {
        config.vcs.remote = remote;
    }

    let vcs = GitVcs::open(".", &config.vcs)?;
    let strategy = strategy_from_config(&config, &vcs, args.bump);
    let changelog = GitChangelogGenerator::new(&vcs, &config.changelog);
    let manager = ReleaseManager::new(&vcs, strategy.as_ref());

    let mut command = if config.changelog.enabled {
        ReleaseCommand::new(manager, &changelog)
    } else {
        ReleaseCommand::minimal(manager)
    };
    if args.no_push {
        command = command.without_push();
    }

    let release_args = ReleaseArgs {
        version: args.release_version,
        assume_yes: args.yes,
        dry_run: args.dry_run,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match command.execute(&release_args, &mut input, &mut output)? {
        ReleaseOutcome::Pushed { version } => {
            ui::display_success(
                &mut output,
                &format!("Successfully released {} to {}", version, config.vcs.remote),
            )?;
        }
        ReleaseOutcome::Created { version } => {
            ui::display_success(&mut output, &format!("Release {} created locally", version))?;
        }
        ReleaseOutcome::Aborted | ReleaseOutcome::Planned { .. } => {}
    }

    Ok(())
}
