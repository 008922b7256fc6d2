//! Energy harvesting and the tier gates it unlocks.
mod field;
mod gate;

pub use field::{EnergyField, EnergyGain, HarvestRules, PathSpec, ResolvedPath, Sphere, harvest};
pub use gate::{AttackTier, consume_tier, select_tier, unlocked_tiers};
