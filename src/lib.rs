pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod error;
pub mod release_manager;
pub mod ui;
pub mod vcs;
pub mod version;
pub mod versioning;

pub use error::{ReleaseError, Result};
pub use release_manager::ReleaseManager;
