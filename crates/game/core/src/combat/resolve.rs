//! Strike resolution and damage routing.

use super::effectiveness::{Matchup, matchup};
use super::tier::AttackPlan;
use crate::env::{Dice, RollContext};
use crate::error::InvariantError;
use crate::state::{Combatant, StatusEffect, StatusKind};
use crate::stats::scale_pct;
use crate::team::{DamageModel, Team};

/// A strike that connected, before mitigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub raw: u64,
    pub matchup: Matchup,
    pub jitter: f64,
    pub critical: bool,
    /// Stun roll passed; installation may still be blocked by immunity.
    pub stun: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrikeOutcome {
    Evaded,
    Hit(Hit),
}

/// Rolls evasion, jitter, critical and stun for one strike.
///
/// Evasion is rolled first and a success short-circuits every later roll.
pub fn resolve_strike(
    attacker: &Combatant,
    defender: &Combatant,
    plan: &AttackPlan,
    dice: &mut Dice,
    critical_pct: u32,
) -> StrikeOutcome {
    if dice.chance(defender.evasion_pct(), RollContext::Evasion) {
        return StrikeOutcome::Evaded;
    }

    let matchup = if attacker.buffs.effective_against_all {
        Matchup::Advantage
    } else {
        matchup(attacker.attribute, defender.attribute)
    };
    let jitter = dice.jitter();
    let mut raw = (plan.value as f64 * matchup.multiplier() * jitter) as u64;

    let critical = dice.chance(attacker.buffs.crit_pct, RollContext::Critical);
    if critical {
        raw = scale_pct(raw, u64::from(critical_pct));
    }

    let stun = plan.stun_pct > 0 && dice.chance(plan.stun_pct, RollContext::Stun);

    StrikeOutcome::Hit(Hit {
        raw,
        matchup,
        jitter,
        critical,
        stun,
    })
}

/// Installs a one-shot stun unless the target is immune.
pub fn install_stun(defender: &mut Combatant) -> bool {
    if defender.status.has(StatusKind::Immunity) {
        return false;
    }
    defender.status.install(StatusEffect::stun())
}

/// Mitigated damage and stun result of a landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landed {
    pub damage: u64,
    pub stunned: bool,
}

/// Routes `hit` onto member `index` of `team`.
///
/// Pooled sides take the raw hit through [`Team::absorb`] only; the member's
/// own reduction and damage cap apply on the per-member path alone.
pub fn land(team: &mut Team, index: usize, hit: &Hit) -> Result<Landed, InvariantError> {
    let damage = match team.model() {
        DamageModel::Pooled => {
            let lost = team.absorb(hit.raw);
            team.member_mut(index)?.register_hit();
            lost
        }
        DamageModel::PerMember => team.member_mut(index)?.take_damage(hit.raw),
    };
    let stunned = hit.stun && install_stun(team.member_mut(index)?);
    Ok(Landed { damage, stunned })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::combat::AttackKind;
    use crate::env::FixedRng;
    use crate::state::Attribute;

    fn always() -> Dice {
        Dice::new(Arc::new(FixedRng(0)), 0)
    }

    fn never() -> Dice {
        Dice::new(Arc::new(FixedRng(99)), 0)
    }

    fn plan(kind: AttackKind, value: u64, stun_pct: u32) -> AttackPlan {
        AttackPlan {
            kind,
            value,
            stun_pct,
        }
    }

    #[test]
    fn full_evasion_negates_every_tier() {
        let attacker = Combatant::new("a", Attribute::Agl, 1, 1_000, 1);
        let defender = Combatant::new("d", Attribute::Str, 1_000, 1, 1).with_evasion(100);
        for kind in [
            AttackKind::Normal,
            AttackKind::Super,
            AttackKind::UltraSuper,
            AttackKind::Bonus,
            AttackKind::ActiveStrike,
        ] {
            let outcome = resolve_strike(&attacker, &defender, &plan(kind, 9_999, 100), &mut never(), 150);
            assert_eq!(outcome, StrikeOutcome::Evaded);
        }
        assert_eq!(defender.hp, 1_000);
        assert!(defender.status.is_empty());
    }

    #[test]
    fn advantage_jitter_and_critical_compose() {
        let mut attacker = Combatant::new("a", Attribute::Agl, 1, 1, 1);
        attacker.buffs.crit_pct = 50;
        let defender = Combatant::new("d", Attribute::Str, 1, 1, 1);

        let StrikeOutcome::Hit(hit) =
            resolve_strike(&attacker, &defender, &plan(AttackKind::Normal, 10_000, 0), &mut always(), 150)
        else {
            panic!("expected a hit");
        };
        assert_eq!(hit.matchup, Matchup::Advantage);
        assert_eq!(hit.jitter, 0.95);
        assert!(hit.critical);
        assert_eq!(hit.raw, 14_250 * 150 / 100);
        assert!(!hit.stun);
    }

    #[test]
    fn effective_against_all_overrides_disadvantage() {
        let mut attacker = Combatant::new("a", Attribute::Str, 1, 1, 1);
        attacker.buffs.effective_against_all = true;
        let defender = Combatant::new("d", Attribute::Agl, 1, 1, 1);
        let StrikeOutcome::Hit(hit) =
            resolve_strike(&attacker, &defender, &plan(AttackKind::Normal, 100, 0), &mut never(), 150)
        else {
            panic!("expected a hit");
        };
        assert_eq!(hit.matchup, Matchup::Advantage);
    }

    #[test]
    fn immunity_blocks_stun() {
        let mut target = Combatant::new("t", Attribute::Phy, 1, 1, 1);
        target
            .status
            .install(StatusEffect::timed(StatusKind::Immunity, 0, 1));
        assert!(!install_stun(&mut target));
        assert!(!target.status.has(StatusKind::Stun));
    }

    fn neutral_hit(raw: u64, stun: bool) -> Hit {
        Hit {
            raw,
            matchup: Matchup::Neutral,
            jitter: 1.0,
            critical: false,
            stun,
        }
    }

    #[test]
    fn pooled_landing_ignores_personal_mitigation() {
        let mut team = Team::pooled();
        team.add_member(Combatant::new("m", Attribute::Int, 10_000, 1, 1).with_damage_reduction(50))
            .unwrap();
        team.member_mut(0)
            .unwrap()
            .status
            .install(StatusEffect::timed(StatusKind::DamageCap, 10, 2));

        let landed = land(&mut team, 0, &neutral_hit(1_000, true)).unwrap();
        assert_eq!(landed, Landed { damage: 1_000, stunned: true });
        assert_eq!(team.pool().total, 9_000);
        assert_eq!(team.member(0).unwrap().hp, 10_000);
        assert_eq!(team.member(0).unwrap().counters.attacks_received, 1);
    }

    #[test]
    fn per_member_landing_applies_reduction_then_cap() {
        let mut team = Team::per_member();
        team.add_member(Combatant::new("e", Attribute::Phy, 10_000, 1, 1).with_damage_reduction(50))
            .unwrap();
        assert_eq!(land(&mut team, 0, &neutral_hit(1_000, false)).unwrap().damage, 500);

        team.member_mut(0)
            .unwrap()
            .status
            .install(StatusEffect::timed(StatusKind::DamageCap, 200, 1));
        assert_eq!(land(&mut team, 0, &neutral_hit(1_000, false)).unwrap().damage, 200);
        assert_eq!(team.member(0).unwrap().hp, 9_300);
    }
}
