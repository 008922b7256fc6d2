//! Team roster, rotation, links, team-wide effects and the leader bonus.
mod effects;
mod leader;
mod links;
mod roster;
mod rotation;

pub use effects::{EffectCategory, EffectSlot, TeamEffects, TimedEffect};
pub use links::LinkGraph;
pub use roster::{DamageModel, HpPool, Team};
pub use rotation::Rotation;
