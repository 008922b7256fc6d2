use crate::combat::{AttackKind, Matchup};
use crate::engine::BattleOutcome;
use crate::items::SupportItem;
use crate::kit::SkillUnavailable;
use crate::state::{LinkSkills, MemberRef, StatusKind};
use crate::team::EffectSlot;

/// Why the engine replaced a player choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// Index path was empty, too long, out of range or repeated a sphere.
    InvalidPath,
    /// Choice did not fit the request kind.
    UnexpectedChoice,
    /// Target was not a living enemy.
    InvalidTarget,
    /// Bonus-mode quality was not a finite number.
    InvalidQuality,
    /// Too many non-terminal choices in one turn.
    RequestBudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeReport {
    Evaded,
    Landed {
        damage: u64,
        critical: bool,
        matchup: Matchup,
        stunned: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    TeamEffectExpired {
        slot: EffectSlot,
    },
    StatusExpired {
        who: MemberRef,
        kind: StatusKind,
    },
    TurnStarted {
        member: usize,
    },
    /// A stun was consumed instead of acting.
    TurnSkipped {
        who: MemberRef,
    },
    LinksActivated {
        member: usize,
        links: LinkSkills,
    },
    Harvested {
        member: usize,
        spheres: usize,
        gain: u32,
        link_energy: u32,
        energy: u8,
        momentum: u8,
    },
    PassiveApplied {
        member: usize,
        energy: u32,
        attack: u64,
        defense: u64,
    },
    Recovered {
        member: usize,
        amount: u64,
    },
    BonusMode {
        member: usize,
        quality: f64,
        passed: bool,
    },
    Strike {
        attacker: MemberRef,
        target: MemberRef,
        kind: AttackKind,
        report: StrikeReport,
    },
    Defeated {
        who: MemberRef,
    },
    ItemUsed {
        item: SupportItem,
        healed: u64,
        /// False when the item was consumed without effect.
        applied: bool,
    },
    ItemUnavailable {
        item: SupportItem,
    },
    ActiveSkillUsed {
        member: usize,
        name: String,
    },
    ActiveSkillRejected {
        member: usize,
        reason: SkillUnavailable,
    },
    Fallback {
        member: usize,
        reason: FallbackReason,
    },
    EnemyPhaseSkipped,
    Rotated {
        active: Vec<usize>,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

/// Append-only record of a battle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.events.push(event);
    }

    pub fn all(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The last `window` events.
    pub fn recent(&self, window: usize) -> &[BattleEvent] {
        &self.events[self.events.len().saturating_sub(window)..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
