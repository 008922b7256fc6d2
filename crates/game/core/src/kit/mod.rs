//! Per-combatant behaviour kits.
//!
//! A kit is attached at construction and fully describes what a combatant
//! does beyond plain attacks: passive buffs, charged-attack side effects,
//! reactions to being hit, counters, the once-per-battle active skill and an
//! optional leader skill. The engine never branches on names.

mod active;
mod leader;
mod passive;

pub use active::{ActiveEffect, ActiveRequirement, ActiveSkill, SkillUnavailable, check_active};
pub use leader::{Boost, LeaderSkill, ScaleRule};
pub use passive::{
    AbsentCategoryBonus, HitEnergy, LowHpBonus, PassiveContext, PassiveTable, apply_passive,
};

/// Side effects of a charged attack on its user and target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuperEffect {
    /// Permanent ATK raise as a percent of base attack.
    pub atk_raise_pct: u32,
    /// Permanent DEF raise as a percent of base defense.
    pub def_raise_pct: u32,
    /// Chance to stun the target.
    pub stun_pct: u32,
}

impl SuperEffect {
    /// Bonus-mode variant: doubled raises, stun capped at certainty.
    pub fn doubled(self) -> Self {
        Self {
            atk_raise_pct: self.atk_raise_pct * 2,
            def_raise_pct: self.def_raise_pct * 2,
            stun_pct: (self.stun_pct * 2).min(100),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuperEffects {
    pub super_attack: SuperEffect,
    pub ultra_super_attack: SuperEffect,
}

/// Permanent ATK raises triggered by combat events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reactive {
    pub atk_raise_pct_per_hit: u32,
    /// Hits received beyond this count no longer raise ATK.
    pub hit_cap: u32,
    pub atk_raise_pct_per_super: u32,
}

/// Heal into the side's HP at turn start once enough hits were received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnStartHeal {
    pub min_hits_received: u32,
    /// Percent of the member's own max HP.
    pub heal_pct: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kit {
    pub passive: PassiveTable,
    pub supers: SuperEffects,
    pub reactive: Reactive,
    /// Chance to counter an enemy hit with a 3x strike.
    pub counter_pct: u32,
    pub recovery: Option<TurnStartHeal>,
    pub active: Option<ActiveSkill>,
    pub leader: Option<LeaderSkill>,
}

impl Kit {
    /// No passives, no skills.
    pub fn plain() -> Self {
        Self::default()
    }
}
