//! Content loaders for reading battle data from files.
//!
//! TOML carries the battle configuration, RON carries rosters. Every
//! identifier in a roster is parsed explicitly and an unknown name fails the
//! whole load.

pub mod config;
pub mod factory;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{MemberSpec, Roster, RosterLoader, RosterSpec, TeamSpec};

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
