//! Attribute type-effectiveness.

use crate::state::Attribute;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Matchup {
    Advantage,
    Neutral,
    Disadvantage,
}

impl Matchup {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Advantage => 1.5,
            Self::Neutral => 1.0,
            Self::Disadvantage => 0.8,
        }
    }
}

pub fn matchup(attacker: Attribute, defender: Attribute) -> Matchup {
    if attacker.is_strong_against(defender) {
        Matchup::Advantage
    } else if defender.is_strong_against(attacker) {
        Matchup::Disadvantage
    } else {
        Matchup::Neutral
    }
}

/// Multiplier before jitter.
pub fn base_multiplier(attacker: Attribute, defender: Attribute) -> f64 {
    matchup(attacker, defender).multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_multipliers() {
        assert_eq!(base_multiplier(Attribute::Agl, Attribute::Str), 1.5);
        assert_eq!(base_multiplier(Attribute::Str, Attribute::Agl), 0.8);
        assert_eq!(base_multiplier(Attribute::Int, Attribute::Int), 1.0);
        assert_eq!(base_multiplier(Attribute::Str, Attribute::Teq), 1.0);
    }

    #[test]
    fn rainbow_is_always_neutral() {
        for color in Attribute::COLORS {
            assert_eq!(matchup(Attribute::Rainbow, color), Matchup::Neutral);
            assert_eq!(matchup(color, Attribute::Rainbow), Matchup::Neutral);
        }
    }
}
