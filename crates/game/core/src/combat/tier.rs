//! Attack kinds and attack-value planning.

use crate::energy::AttackTier;
use crate::kit::SuperEffect;
use crate::state::Combatant;
use crate::stats::scale_pct;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Normal,
    Super,
    UltraSuper,
    /// Passed bonus mode.
    Bonus,
    ActiveStrike,
    Counter,
}

impl AttackKind {
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Normal => 1,
            Self::Super => 2,
            Self::UltraSuper | Self::Counter => 3,
            Self::Bonus => 5,
            Self::ActiveStrike => 6,
        }
    }

    /// Charged kinds count as super attacks and trigger kit super effects.
    pub const fn is_charged(self) -> bool {
        matches!(self, Self::Super | Self::UltraSuper | Self::Bonus)
    }
}

impl From<AttackTier> for AttackKind {
    fn from(tier: AttackTier) -> Self {
        match tier {
            AttackTier::Normal => Self::Normal,
            AttackTier::Super => Self::Super,
            AttackTier::UltraSuper => Self::UltraSuper,
            AttackTier::Bonus => Self::Bonus,
        }
    }
}

/// Attack value ready for resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackPlan {
    pub kind: AttackKind,
    pub value: u64,
    pub stun_pct: u32,
}

fn super_effect(attacker: &Combatant, kind: AttackKind) -> Option<SuperEffect> {
    let supers = attacker.kit.supers;
    match kind {
        AttackKind::Super => Some(supers.super_attack),
        AttackKind::UltraSuper => Some(supers.ultra_super_attack),
        AttackKind::Bonus if attacker.is_boosted_variant => {
            Some(supers.ultra_super_attack.doubled())
        }
        AttackKind::Bonus => Some(supers.super_attack.doubled()),
        _ => None,
    }
}

/// Applies the kind's self-buffs to `attacker` and computes the value.
///
/// `bonus_pct` scales the final value and is only non-zero for a passed
/// bonus mode.
pub fn plan_attack(attacker: &mut Combatant, kind: AttackKind, bonus_pct: u32) -> AttackPlan {
    let effect = super_effect(attacker, kind);
    if let Some(effect) = effect {
        attacker.buffs.flat_atk += scale_pct(attacker.base_attack, u64::from(effect.atk_raise_pct));
        attacker.buffs.flat_def +=
            scale_pct(attacker.base_defense, u64::from(effect.def_raise_pct));
        attacker.register_super();
    }
    let value = attacker.attack().saturating_mul(kind.multiplier());
    AttackPlan {
        kind,
        value: scale_pct(value, 100 + u64::from(bonus_pct)),
        stun_pct: effect.map_or(0, |e| e.stun_pct),
    }
}

/// Active-skill strike: ATK raised for this turn, fixed multiplier, certain
/// stun.
pub fn plan_active_strike(attacker: &mut Combatant, atk_pct: u32, multiplier: u32) -> AttackPlan {
    attacker.buffs.atk_pct += atk_pct;
    attacker.recompute_derived();
    AttackPlan {
        kind: AttackKind::ActiveStrike,
        value: attacker.attack().saturating_mul(u64::from(multiplier)),
        stun_pct: 100,
    }
}
