//! Battle sequencing.
//!
//! [`BattleEngine`] owns both teams and drives the round state machine:
//!
//! ```text
//! RoundStart -> TeamUpkeep -> MemberTurn(0..n) -> EnemyPhase -> Rotate -> RoundStart
//!                                  \__________________\_____________-> Ended
//! ```
//!
//! Player decisions arrive through [`MoveProvider`]; a [`BattleSnapshot`] is
//! published after every state-changing step.

mod enemy;
mod events;
mod member;
mod phase;
mod request;
mod sequencer;
mod snapshot;

pub use events::{BattleEvent, EventLog, FallbackReason, StrikeReport};
pub use phase::{BattleOutcome, Phase};
pub use request::{MoveChoice, MoveContext, MoveProvider, RequestKind, ScriptedProvider, default_choice};
pub use sequencer::BattleEngine;
pub use snapshot::{BattleSnapshot, MemberView, TeamView};
