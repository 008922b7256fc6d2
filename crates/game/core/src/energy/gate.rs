//! Energy and momentum thresholds that gate charged attacks.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::InvariantError;
use crate::state::Combatant;
use crate::stats::Meter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackTier {
    Normal,
    Super,
    UltraSuper,
    /// Momentum meter full; resolved through the bonus-mode request.
    Bonus,
}

fn energy_tier(combatant: &Combatant) -> AttackTier {
    let energy = combatant.energy;
    if combatant.is_boosted_variant && energy.at_least(BattleConfig::ULTRA_THRESHOLD) {
        AttackTier::UltraSuper
    } else if energy.at_least(BattleConfig::SUPER_THRESHOLD) {
        AttackTier::Super
    } else {
        AttackTier::Normal
    }
}

/// Tier a plain attack command resolves to. A full momentum meter takes
/// priority over the energy tiers.
pub fn select_tier(combatant: &Combatant, momentum: &Meter) -> AttackTier {
    if momentum.is_full() {
        AttackTier::Bonus
    } else {
        energy_tier(combatant)
    }
}

/// Every tier currently reachable, for the move-request context.
pub fn unlocked_tiers(
    combatant: &Combatant,
    momentum: &Meter,
) -> ArrayVec<AttackTier, { <AttackTier as strum::EnumCount>::COUNT }> {
    let mut tiers = ArrayVec::new();
    tiers.push(AttackTier::Normal);
    match energy_tier(combatant) {
        AttackTier::UltraSuper => {
            tiers.push(AttackTier::Super);
            tiers.push(AttackTier::UltraSuper);
        }
        AttackTier::Super => tiers.push(AttackTier::Super),
        _ => {}
    }
    if momentum.is_full() {
        tiers.push(AttackTier::Bonus);
    }
    tiers
}

/// Pays for `tier`. Charged energy tiers drain the member's energy to zero,
/// bonus mode drains the side's momentum and leaves energy untouched.
pub fn consume_tier(
    tier: AttackTier,
    combatant: &mut Combatant,
    momentum: &mut Meter,
) -> Result<(), InvariantError> {
    let threshold = match tier {
        AttackTier::Normal => return Ok(()),
        AttackTier::Bonus => {
            momentum.drain();
            return Ok(());
        }
        AttackTier::Super => BattleConfig::SUPER_THRESHOLD,
        AttackTier::UltraSuper => BattleConfig::ULTRA_THRESHOLD,
    };
    combatant.energy.spend(threshold)?;
    combatant.energy.drain();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attribute;

    fn member(energy: u32, boosted: bool) -> Combatant {
        let c = Combatant::new("g", Attribute::Agl, 1, 1, 1).with_energy(energy);
        if boosted { c.boosted() } else { c }
    }

    #[test]
    fn thresholds_select_tiers() {
        let empty = Meter::empty();
        assert_eq!(select_tier(&member(11, true), &empty), AttackTier::Normal);
        assert_eq!(select_tier(&member(12, true), &empty), AttackTier::Super);
        assert_eq!(select_tier(&member(18, true), &empty), AttackTier::UltraSuper);
        assert_eq!(select_tier(&member(24, false), &empty), AttackTier::Super);
    }

    #[test]
    fn full_momentum_takes_priority() {
        let full = Meter::new(24);
        assert_eq!(select_tier(&member(24, true), &full), AttackTier::Bonus);
        assert!(unlocked_tiers(&member(0, false), &full).contains(&AttackTier::Bonus));
    }

    #[test]
    fn ultra_always_resets_energy_to_zero() {
        for energy in 18..=24 {
            let mut c = member(energy, true);
            let mut momentum = Meter::new(5);
            consume_tier(AttackTier::UltraSuper, &mut c, &mut momentum).unwrap();
            assert_eq!(c.energy.value(), 0);
            assert_eq!(momentum.value(), 5);
        }
    }

    #[test]
    fn bonus_drains_momentum_only() {
        let mut c = member(20, true);
        let mut momentum = Meter::new(24);
        consume_tier(AttackTier::Bonus, &mut c, &mut momentum).unwrap();
        assert_eq!(momentum.value(), 0);
        assert_eq!(c.energy.value(), 20);
    }

    #[test]
    fn underpaid_tier_is_an_invariant_error() {
        let mut c = member(10, true);
        let mut momentum = Meter::empty();
        assert!(matches!(
            consume_tier(AttackTier::Super, &mut c, &mut momentum),
            Err(InvariantError::EnergyUnderflow { have: 10, need: 12, .. })
        ));
        assert_eq!(c.energy.value(), 10);
    }
}
