//! Damage pipeline.
//!
//! Pure functions over combatant state plus the injected [`Dice`]:
//!
//! 1. evasion on the defender (success negates everything)
//! 2. attack value x type multiplier x jitter
//! 3. critical
//! 4. mitigation, routed to the pooled or individual HP path
//! 5. stun installation
//!
//! [`Dice`]: crate::env::Dice

pub mod effectiveness;
pub mod resolve;
pub mod tier;

pub use effectiveness::{Matchup, base_multiplier, matchup};
pub use resolve::{Hit, Landed, StrikeOutcome, install_stun, land, resolve_strike};
pub use tier::{AttackKind, AttackPlan, plan_active_strike, plan_attack};
