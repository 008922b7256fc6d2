use core::str::FromStr;

use crate::error::ParseAttributeError;

/// Elemental typing of combatants and energy spheres.
///
/// The five colours form a cycle where each is strong against the next:
/// STR > PHY > INT > TEQ > AGL > STR. Rainbow only exists on spheres.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    #[strum(serialize = "STR")]
    Str,
    #[strum(serialize = "AGL")]
    Agl,
    #[strum(serialize = "TEQ")]
    Teq,
    #[strum(serialize = "INT")]
    Int,
    #[strum(serialize = "PHY")]
    Phy,
    #[strum(serialize = "RAINBOW")]
    Rainbow,
}

impl Attribute {
    /// Colours a regular sphere may take.
    pub const COLORS: [Attribute; 5] = [Self::Str, Self::Agl, Self::Teq, Self::Int, Self::Phy];

    pub const fn is_color(self) -> bool {
        !matches!(self, Self::Rainbow)
    }

    /// The colour this one deals advantaged damage to.
    pub const fn strong_against(self) -> Option<Attribute> {
        match self {
            Self::Str => Some(Self::Phy),
            Self::Phy => Some(Self::Int),
            Self::Int => Some(Self::Teq),
            Self::Teq => Some(Self::Agl),
            Self::Agl => Some(Self::Str),
            Self::Rainbow => None,
        }
    }

    pub fn is_strong_against(self, other: Attribute) -> bool {
        self.strong_against() == Some(other)
    }
}

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STR" => Ok(Self::Str),
            "AGL" => Ok(Self::Agl),
            "TEQ" => Ok(Self::Teq),
            "INT" => Ok(Self::Int),
            "PHY" => Ok(Self::Phy),
            "RAINBOW" | "RBW" => Ok(Self::Rainbow),
            _ => Err(ParseAttributeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn advantage_cycle_is_closed() {
        let mut current = Attribute::Str;
        for _ in 0..5 {
            current = current.strong_against().unwrap();
        }
        assert_eq!(current, Attribute::Str);
    }

    #[test]
    fn advantage_is_never_mutual() {
        for a in Attribute::iter() {
            for b in Attribute::iter() {
                assert!(!(a.is_strong_against(b) && b.is_strong_against(a)));
            }
        }
    }

    #[test]
    fn parses_identifiers_case_insensitively() {
        assert_eq!("teq".parse::<Attribute>().unwrap(), Attribute::Teq);
        assert_eq!(" INT ".parse::<Attribute>().unwrap(), Attribute::Int);
        assert!("PURPLE".parse::<Attribute>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for attr in Attribute::iter() {
            assert_eq!(attr.to_string().parse::<Attribute>().unwrap(), attr);
        }
    }
}
