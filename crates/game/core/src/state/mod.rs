//! Combatant state and the tag/attribute vocabulary it is built from.
mod attribute;
mod combatant;
mod status;
mod tags;

pub use attribute::Attribute;
pub use combatant::{Combatant, Counters};
pub use status::{EffectDuration, StatusEffect, StatusEffects, StatusKind};
pub use tags::{Categories, LinkEffect, LinkSkills, parse_categories, parse_links};

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Stable reference to a combatant: side plus roster index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberRef {
    pub side: Side,
    pub index: usize,
}

impl MemberRef {
    pub const fn player(index: usize) -> Self {
        Self {
            side: Side::Player,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }
}

impl core::fmt::Display for MemberRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}
