//! Stock kits and rosters.

use battle_core::error::InvariantError;
use battle_core::kit::{
    AbsentCategoryBonus, ActiveEffect, ActiveRequirement, ActiveSkill, Boost, HitEnergy,
    LeaderSkill, LowHpBonus, PassiveTable, Reactive, ScaleRule, SuperEffects, TurnStartHeal,
};
use battle_core::{Attribute, Categories, Combatant, Kit, LinkSkills, Team};

/// Named kit presets, selectable from roster files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum KitId {
    Plain,
    DawnOfAnIdealWorld,
    InfiniteSanctuary,
}

impl KitId {
    pub fn kit(self) -> Kit {
        match self {
            Self::Plain => Kit::plain(),
            Self::DawnOfAnIdealWorld => dawn_of_an_ideal_world(),
            Self::InfiniteSanctuary => infinite_sanctuary(),
        }
    }

    /// Whether combatants built on this kit unlock the ultra tier.
    pub fn boosted(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

pub fn dawn_of_an_ideal_world() -> Kit {
    Kit {
        passive: PassiveTable {
            atk_pct: 100,
            def_pct: 100,
            reduction_pct: 20,
            super_threshold_atk_pct: 50,
            super_threshold_def_pct: 50,
            ultra_threshold_additional_pct: 100,
            full_energy_effective_all: true,
            reduction_pct_per_hit: 2,
            reduction_hit_cap: 5,
            hit_energy: Some(HitEnergy {
                hits_per_point: 5,
                max: 5,
            }),
            ..PassiveTable::default()
        },
        supers: SuperEffects::default(),
        reactive: Reactive::default(),
        counter_pct: 70,
        recovery: Some(TurnStartHeal {
            min_hits_received: 5,
            heal_pct: 10,
        }),
        active: Some(ActiveSkill {
            name: "Lightning of Absolution",
            min_turn: 4,
            requirement: ActiveRequirement::SuperAttacks(5),
            effect: ActiveEffect::Strike {
                atk_pct: 300,
                multiplier: 6,
            },
        }),
        leader: Some(LeaderSkill {
            name: "Dawn of an Ideal World",
            primary: ScaleRule {
                categories: Categories::WORLDWIDE_CHAOS.union(Categories::POTARA),
                boost: Boost {
                    stat_pct: 250,
                    energy: 4,
                },
            },
            secondary: None,
            fallback: None,
        }),
    }
}

pub fn infinite_sanctuary() -> Kit {
    Kit {
        passive: PassiveTable {
            energy_per_turn: 6,
            atk_pct: 100,
            def_pct: 150,
            reduction_pct: 40,
            crit_pct: 70,
            additional_attack_pct: 80,
            absent_category: Some(AbsentCategoryBonus {
                category: Categories::REALM_OF_GODS,
                energy: 3,
                atk_pct: 50,
                def_pct: 50,
            }),
            low_hp: Some(LowHpBonus {
                hp_at_most_pct: 70,
                def_pct: 50,
            }),
            atk_pct_per_hit: 25,
            atk_per_hit_max_pct: 150,
            ..PassiveTable::default()
        },
        supers: SuperEffects::default(),
        reactive: Reactive::default(),
        counter_pct: 0,
        recovery: None,
        active: Some(ActiveSkill {
            name: "Omnipresence",
            min_turn: 4,
            requirement: ActiveRequirement::SideHpAtMost(30),
            effect: ActiveEffect::Domain { rounds: 5 },
        }),
        leader: Some(LeaderSkill {
            name: "Infinite Sanctuary",
            primary: ScaleRule {
                categories: Categories::REALM_OF_GODS
                    .union(Categories::WORLDWIDE_CHAOS)
                    .union(Categories::FUSED_FIGHTERS),
                boost: Boost {
                    stat_pct: 270,
                    energy: 3,
                },
            },
            secondary: Some(ScaleRule {
                categories: Categories::TIME_TRAVELERS.union(Categories::FINAL_TRUMP_CARD),
                boost: Boost {
                    stat_pct: 130,
                    energy: 0,
                },
            }),
            fallback: Some(Boost {
                stat_pct: 250,
                energy: 3,
            }),
        }),
    }
}

fn zamasu_links() -> LinkSkills {
    LinkSkills::BIG_BAD_BOSSES
        | LinkSkills::DISMAL_FUTURE
        | LinkSkills::GODLY_POWER
        | LinkSkills::FUSED_FIGHTER
        | LinkSkills::FIERCE_BATTLE
}

/// The stock three-member pooled team, led by Dawn of an Ideal World.
pub fn default_player_team() -> Result<Team, InvariantError> {
    Team::pooled()
        .with_member(
            Combatant::new(
                "Dawn of an Ideal World Fusion Zamasu",
                Attribute::Int,
                23_000,
                25_000,
                15_000,
            )
            .with_categories(Categories::WORLDWIDE_CHAOS | Categories::POTARA)
            .with_links(zamasu_links())
            .with_kit(KitId::DawnOfAnIdealWorld.kit())
            .boosted()
            .leader(),
        )?
        .with_member(
            Combatant::new(
                "Infinite Sanctuary Fusion Zamasu",
                Attribute::Teq,
                25_000,
                26_000,
                14_000,
            )
            .with_categories(
                Categories::REALM_OF_GODS
                    | Categories::WORLDWIDE_CHAOS
                    | Categories::FUSED_FIGHTERS
                    | Categories::TIME_TRAVELERS,
            )
            .with_links(zamasu_links())
            .with_kit(KitId::InfiniteSanctuary.kit())
            .boosted(),
        )?
        .with_member(
            Combatant::new(
                "Terrifying Zero Mortals Plan",
                Attribute::Str,
                21_000,
                22_000,
                13_000,
            )
            .with_categories(Categories::POTARA | Categories::FUTURE_SAGA)
            .with_links(zamasu_links()),
        )
}

/// The stock single boss: heavy reduction, three attacks per turn.
pub fn default_enemy_team() -> Result<Team, InvariantError> {
    Team::per_member().with_member(
        Combatant::new(
            "Super Saiyan God SS Vegeta",
            Attribute::Str,
            12_000_000,
            370_000,
            150_000,
        )
        .with_damage_reduction(66)
        .with_max_attacks(3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kit_ids_parse_from_snake_case() {
        assert_eq!(
            KitId::from_str("dawn_of_an_ideal_world"),
            Ok(KitId::DawnOfAnIdealWorld)
        );
        assert!(KitId::from_str("Dawn").is_err());
        assert_eq!(KitId::InfiniteSanctuary.to_string(), "infinite_sanctuary");
    }

    #[test]
    fn stock_leader_scales_matching_members() {
        let mut team = default_player_team().expect("three members fit");
        assert_eq!(team.apply_leader_bonus(), Ok(true));
        let hp: Vec<u64> = team.members().iter().map(|m| m.max_hp).collect();
        // Every stock member carries WORLDWIDE_CHAOS or POTARA.
        assert_eq!(hp, vec![57_500, 62_500, 52_500]);
        assert_eq!(team.pool().max, 172_500);
        assert!(team.members().iter().all(|m| m.energy.value() == 4));
    }

    #[test]
    fn stock_kits_carry_no_super_side_effects() {
        for id in [KitId::DawnOfAnIdealWorld, KitId::InfiniteSanctuary] {
            let kit = id.kit();
            assert_eq!(kit.supers, SuperEffects::default(), "{id}");
            assert_eq!(kit.reactive, Reactive::default(), "{id}");
        }
        // Sanctuary's per-hit ATK is turn-scoped through the passive table.
        let passive = KitId::InfiniteSanctuary.kit().passive;
        assert_eq!((passive.atk_pct_per_hit, passive.atk_per_hit_max_pct), (25, 150));
        assert_eq!(KitId::DawnOfAnIdealWorld.kit().counter_pct, 70);
    }

    #[test]
    fn stock_boss_carries_reduction_and_three_attacks() {
        let team = default_enemy_team().expect("one member fits");
        let boss = team.member(0).expect("boss");
        assert_eq!(boss.base_reduction_pct, 66);
        assert_eq!(boss.max_attacks_per_turn, 3);
        assert!(team.members().iter().all(|m| m.kit == Kit::plain()));
    }
}
