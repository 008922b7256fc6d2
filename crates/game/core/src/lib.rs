//! Deterministic rules engine for turn-based elemental team battles.
//!
//! `battle-core` holds the canonical battle rules: combatants and their kits,
//! the energy field, team rotation and link skills, the damage pipeline and
//! the round state machine. It performs no I/O; randomness is injected
//! through [`env::RngOracle`] and player decisions through
//! [`engine::MoveProvider`]. All state mutation flows through
//! [`engine::BattleEngine`].
pub mod combat;
pub mod config;
pub mod energy;
pub mod engine;
pub mod env;
pub mod error;
pub mod items;
pub mod kit;
pub mod state;
pub mod stats;
pub mod team;

pub use combat::{AttackKind, AttackPlan, Hit, Matchup, StrikeOutcome};
pub use config::BattleConfig;
pub use energy::{AttackTier, EnergyField, PathSpec, Sphere};
pub use engine::{
    BattleEngine, BattleEvent, BattleOutcome, BattleSnapshot, EventLog, FallbackReason,
    MoveChoice, MoveContext, MoveProvider, Phase, RequestKind, ScriptedProvider, StrikeReport,
};
pub use env::{Dice, FixedRng, PcgRng, RngOracle};
pub use error::{
    BattleFault, ErrorContext, ErrorSeverity, InvariantError, ParseAttributeError,
    ParseCategoryError,
};
pub use items::{Inventory, ItemEffect, SupportItem};
pub use kit::{ActiveSkill, Kit, LeaderSkill, PassiveTable, SkillUnavailable};
pub use state::{Attribute, Categories, Combatant, LinkSkills, MemberRef, Side, StatusKind};
pub use stats::{Buffs, Meter};
pub use team::{DamageModel, EffectSlot, HpPool, Team};
