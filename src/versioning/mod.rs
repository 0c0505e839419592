//! Versioning strategies - how the next release version is chosen
//!
//! A [Strategy] is consulted only when the operator does not name a version.
//! Both built-in strategies bump the last released version found in the
//! [VersionControlSystem](crate::vcs::VersionControlSystem):
//!
//! - [SemanticVersioning]: always applies the same bump
//! - [ConventionalVersioning]: derives the bump from conventional commits

pub mod conventional;
pub mod semantic;

pub use conventional::ConventionalVersioning;
pub use semantic::SemanticVersioning;

use crate::config::{Config, StrategyKind};
use crate::error::Result;
use crate::vcs::VersionControlSystem;
use crate::version::VersionBump;

/// Computes the version of the next release
pub trait Strategy {
    fn get_next_version(&self) -> Result<String>;
}

/// Builds the strategy selected by configuration.
///
/// A `bump_override` (from the command line) always selects
/// [SemanticVersioning] with that bump.
pub fn strategy_from_config<'a>(
    config: &Config,
    vcs: &'a dyn VersionControlSystem,
    bump_override: Option<VersionBump>,
) -> Box<dyn Strategy + 'a> {
    let initial = config.versioning.initial_version.clone();

    match (bump_override, config.versioning.strategy) {
        (Some(bump), _) => Box::new(SemanticVersioning::new(vcs, bump, initial)),
        (None, StrategyKind::Semantic) => Box::new(SemanticVersioning::new(
            vcs,
            config.versioning.bump,
            initial,
        )),
        (None, StrategyKind::Conventional) => Box::new(ConventionalVersioning::new(
            vcs,
            config.conventional_commits.clone(),
            initial,
        )),
    }
}
