//! Passive skill table, applied once per member turn after the harvest.

use crate::config::BattleConfig;
use crate::state::{Categories, Combatant};

/// Bonus granted while no living enemy carries `category`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbsentCategoryBonus {
    pub category: Categories,
    pub energy: u32,
    pub atk_pct: u32,
    pub def_pct: u32,
}

/// DEF bonus while the side's HP ratio is at most `hp_at_most_pct`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LowHpBonus {
    pub hp_at_most_pct: u32,
    pub def_pct: u32,
}

/// One energy per `hits_per_point` hits received, at most `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitEnergy {
    pub hits_per_point: u32,
    pub max: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassiveTable {
    pub energy_per_turn: u32,
    pub atk_pct: u32,
    pub def_pct: u32,
    pub reduction_pct: u32,
    pub crit_pct: u32,
    pub dodge_pct: u32,
    pub additional_attack_pct: u32,
    pub absent_category: Option<AbsentCategoryBonus>,
    pub low_hp: Option<LowHpBonus>,

    // energy thresholds, checked after this turn's passive energy
    pub super_threshold_atk_pct: u32,
    pub super_threshold_def_pct: u32,
    pub ultra_threshold_additional_pct: u32,
    pub full_energy_effective_all: bool,

    // scaling with hits received
    pub reduction_pct_per_hit: u32,
    pub reduction_hit_cap: u32,
    pub atk_pct_per_hit: u32,
    pub atk_per_hit_max_pct: u32,
    pub hit_energy: Option<HitEnergy>,
}

/// Battle facts a passive may condition on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassiveContext {
    pub side_hp_pct: u32,
    /// Union of categories over living enemies.
    pub enemy_categories: Categories,
    pub enemies_present: bool,
}

/// Applies the combatant's passive table onto its freshly reset buffs.
///
/// Returns the energy the passive granted.
pub fn apply_passive(combatant: &mut Combatant, ctx: &PassiveContext) -> u32 {
    let passive = &combatant.kit.passive;
    let buffs = &mut combatant.buffs;
    let hits = combatant.counters.attacks_received;
    let mut energy = 0;

    energy += u32::from(combatant.energy.add(passive.energy_per_turn));
    if let Some(bonus) = passive.absent_category
        && ctx.enemies_present
        && !ctx.enemy_categories.intersects(bonus.category)
    {
        energy += u32::from(combatant.energy.add(bonus.energy));
        buffs.atk_pct += bonus.atk_pct;
        buffs.def_pct += bonus.def_pct;
    }

    buffs.atk_pct += passive.atk_pct;
    buffs.def_pct += passive.def_pct;
    buffs.reduction_pct += passive.reduction_pct;
    buffs.crit_pct += passive.crit_pct;
    buffs.dodge_pct += passive.dodge_pct;
    buffs.additional_attack_pct = buffs.additional_attack_pct.max(passive.additional_attack_pct);

    if let Some(low) = passive.low_hp
        && ctx.side_hp_pct <= low.hp_at_most_pct
    {
        buffs.def_pct += low.def_pct;
    }

    if combatant.energy.at_least(BattleConfig::SUPER_THRESHOLD) {
        buffs.atk_pct += passive.super_threshold_atk_pct;
        buffs.def_pct += passive.super_threshold_def_pct;
    }
    if combatant.energy.at_least(BattleConfig::ULTRA_THRESHOLD) {
        buffs.additional_attack_pct = buffs
            .additional_attack_pct
            .max(passive.ultra_threshold_additional_pct);
    }
    if combatant.energy.is_full() && passive.full_energy_effective_all {
        buffs.effective_against_all = true;
    }

    buffs.reduction_pct += hits.min(passive.reduction_hit_cap) * passive.reduction_pct_per_hit;
    buffs.atk_pct += hits
        .saturating_mul(passive.atk_pct_per_hit)
        .min(passive.atk_per_hit_max_pct);
    if let Some(hit_energy) = passive.hit_energy
        && hit_energy.hits_per_point > 0
    {
        let points = (hits / hit_energy.hits_per_point).min(hit_energy.max);
        energy += u32::from(combatant.energy.add(points));
    }

    combatant.recompute_derived();
    energy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::Kit;
    use crate::state::Attribute;

    fn ctx() -> PassiveContext {
        PassiveContext {
            side_hp_pct: 100,
            enemy_categories: Categories::empty(),
            enemies_present: true,
        }
    }

    fn with_passive(passive: PassiveTable) -> Combatant {
        Combatant::new("p", Attribute::Teq, 1_000, 1_000, 1_000).with_kit(Kit {
            passive,
            ..Kit::plain()
        })
    }

    #[test]
    fn base_percentages_flow_into_derived_stats() {
        let mut c = with_passive(PassiveTable {
            atk_pct: 100,
            def_pct: 50,
            ..PassiveTable::default()
        });
        apply_passive(&mut c, &ctx());
        assert_eq!(c.attack(), 2_000);
        assert_eq!(c.defense(), 1_500);
    }

    #[test]
    fn thresholds_see_energy_granted_this_turn() {
        let mut c = with_passive(PassiveTable {
            energy_per_turn: 6,
            super_threshold_atk_pct: 50,
            ultra_threshold_additional_pct: 100,
            full_energy_effective_all: true,
            ..PassiveTable::default()
        });
        c.energy.set(8);
        assert_eq!(apply_passive(&mut c, &ctx()), 6);
        assert_eq!(c.buffs.atk_pct, 50);
        assert_eq!(c.buffs.additional_attack_pct, 0);
        assert!(!c.buffs.effective_against_all);

        c.buffs.reset_turn();
        c.energy.set(24);
        apply_passive(&mut c, &ctx());
        assert_eq!(c.buffs.additional_attack_pct, 100);
        assert!(c.buffs.effective_against_all);
    }

    #[test]
    fn absent_category_bonus_needs_enemies_without_it() {
        let passive = PassiveTable {
            absent_category: Some(AbsentCategoryBonus {
                category: Categories::REALM_OF_GODS,
                energy: 3,
                atk_pct: 50,
                def_pct: 50,
            }),
            ..PassiveTable::default()
        };

        let mut c = with_passive(passive.clone());
        assert_eq!(apply_passive(&mut c, &ctx()), 3);

        let mut c = with_passive(passive.clone());
        let blocked = PassiveContext {
            enemy_categories: Categories::REALM_OF_GODS,
            ..ctx()
        };
        assert_eq!(apply_passive(&mut c, &blocked), 0);

        let mut c = with_passive(passive);
        let empty = PassiveContext {
            enemies_present: false,
            ..ctx()
        };
        assert_eq!(apply_passive(&mut c, &empty), 0);
    }

    #[test]
    fn hit_scaling_respects_caps() {
        let mut c = with_passive(PassiveTable {
            reduction_pct: 20,
            reduction_pct_per_hit: 2,
            reduction_hit_cap: 5,
            atk_pct_per_hit: 25,
            atk_per_hit_max_pct: 150,
            hit_energy: Some(HitEnergy {
                hits_per_point: 5,
                max: 5,
            }),
            ..PassiveTable::default()
        });
        c.counters.attacks_received = 40;
        let gained = apply_passive(&mut c, &ctx());
        assert_eq!(c.buffs.reduction_pct, 30);
        assert_eq!(c.buffs.atk_pct, 150);
        assert_eq!(gained, 5);
    }

    #[test]
    fn low_hp_bonus_is_inclusive() {
        let mut c = with_passive(PassiveTable {
            low_hp: Some(LowHpBonus {
                hp_at_most_pct: 70,
                def_pct: 50,
            }),
            ..PassiveTable::default()
        });
        let low = PassiveContext {
            side_hp_pct: 70,
            ..ctx()
        };
        apply_passive(&mut c, &low);
        assert_eq!(c.buffs.def_pct, 50);
    }
}
