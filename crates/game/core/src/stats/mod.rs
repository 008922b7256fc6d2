//! Numeric building blocks for combatant stats.
//!
//! ```text
//! [ base stats ] --(percent buffs)--> --(link percent)--> --(+flat)--> [ derived ]
//! ```
//!
//! Percentages are integers (`20` = +20%). Derived values are recomputed
//! from scratch after every mutation and never edited in place.

pub mod buffs;
pub mod meter;

pub use buffs::{Buffs, DerivedStats, derive_stats, scale_pct};
pub use meter::Meter;
