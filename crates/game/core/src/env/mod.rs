//! Injected sources of nondeterminism.
//!
//! The engine never reads wall-clock time or thread-local randomness; every
//! roll goes through an [`RngOracle`] wrapped by [`Dice`], so a battle replays
//! identically from the same oracle and seed.
mod dice;
mod rng;

pub use dice::{Dice, RollContext};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};
