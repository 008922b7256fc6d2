//! Player decision boundary.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use strum::EnumCount;

use super::snapshot::BattleSnapshot;
use crate::config::BattleConfig;
use crate::energy::{AttackTier, EnergyField, PathSpec};
use crate::items::{Inventory, SupportItem};
use crate::kit::SkillUnavailable;
use crate::state::Combatant;

/// What the engine is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestKind {
    /// Path through the energy field.
    Harvest,
    /// Attack, item or active skill.
    Action,
    /// Bonus-mode quality score.
    DokkanPlay,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveChoice {
    Attack { target: usize },
    UseItem { item: SupportItem },
    UseActiveSkill { target: Option<usize> },
    HarvestPath { path: PathSpec },
    DokkanPlay { quality: f64 },
}

impl MoveChoice {
    /// Whether this choice answers a request of `kind`.
    pub fn answers(&self, kind: RequestKind) -> bool {
        matches!(
            (self, kind),
            (Self::HarvestPath { .. }, RequestKind::Harvest)
                | (Self::DokkanPlay { .. }, RequestKind::DokkanPlay)
                | (
                    Self::Attack { .. } | Self::UseItem { .. } | Self::UseActiveSkill { .. },
                    RequestKind::Action
                )
        )
    }
}

/// Everything a provider may inspect when choosing a move.
#[derive(Clone, Debug)]
pub struct MoveContext<'a> {
    pub kind: RequestKind,
    pub round: u32,
    /// Team index of the acting member.
    pub member: usize,
    pub actor: &'a Combatant,
    /// Indices of living enemies.
    pub legal_targets: ArrayVec<usize, { BattleConfig::MAX_MEMBERS }>,
    pub unlocked: ArrayVec<AttackTier, { AttackTier::COUNT }>,
    /// Tier a plain attack would resolve to right now.
    pub attack_tier: AttackTier,
    pub active_skill: Result<(), SkillUnavailable>,
    pub inventory: &'a Inventory,
    pub momentum: u8,
    pub side_hp_pct: u32,
    pub field: &'a EnergyField,
    /// Requests already answered in this turn's action loop.
    pub attempt: u32,
}

/// Source of player decisions.
pub trait MoveProvider {
    fn request_move(&mut self, ctx: &MoveContext<'_>) -> MoveChoice;

    /// Receives the state after every state-changing step.
    fn on_snapshot(&mut self, _snapshot: &BattleSnapshot) {}
}

/// Plain choice for `ctx`: longest harvest path, attack the first legal
/// target, perfect bonus play.
pub fn default_choice(ctx: &MoveContext<'_>) -> MoveChoice {
    match ctx.kind {
        RequestKind::Harvest => MoveChoice::HarvestPath {
            path: PathSpec::Prefix(usize::MAX),
        },
        RequestKind::Action => MoveChoice::Attack {
            target: ctx.legal_targets.first().copied().unwrap_or(0),
        },
        RequestKind::DokkanPlay => MoveChoice::DokkanPlay { quality: 1.0 },
    }
}

/// Replays queued choices in order.
///
/// The head of the queue is only consumed by a request it answers; any
/// other request gets [`default_choice`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<MoveChoice>,
    snapshots: usize,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = MoveChoice>) -> Self {
        Self {
            script: script.into_iter().collect(),
            snapshots: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn snapshots_seen(&self) -> usize {
        self.snapshots
    }
}

impl MoveProvider for ScriptedProvider {
    fn request_move(&mut self, ctx: &MoveContext<'_>) -> MoveChoice {
        match self.script.front() {
            Some(next) if next.answers(ctx.kind) => {
                self.script.pop_front().unwrap_or_else(|| default_choice(ctx))
            }
            _ => default_choice(ctx),
        }
    }

    fn on_snapshot(&mut self, _snapshot: &BattleSnapshot) {
        self.snapshots += 1;
    }
}
