//! Battle content: preset kits and rosters, plus loaders for data files.
//!
//! - Preset kits for the characters of the stock roster
//! - The stock player and enemy teams
//! - Battle configuration (data-driven via TOML)
//! - Rosters (data-driven via RON)
//!
//! Content is turned into `battle-core` teams before a battle starts and is
//! never consulted by the engine afterwards.

pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::{KitId, default_enemy_team, default_player_team};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, MemberSpec, Roster, RosterLoader, RosterSpec, TeamSpec};
