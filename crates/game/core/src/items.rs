//! Support items and the side's item inventory.

use strum::{EnumCount, IntoEnumIterator};

use crate::team::EffectSlot;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumCount,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SupportItem {
    #[strum(serialize = "Ghost Usher")]
    GhostUsher,
    #[strum(serialize = "Android #8")]
    Android8,
    #[strum(serialize = "Princess Snake")]
    PrincessSnake,
    #[strum(serialize = "Whis")]
    Whis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    /// Skip the next enemy phase. Only the first use per battle counts.
    DelayEnemy,
    /// Heal a percent of the side's maximum HP.
    Heal { pct: u32 },
    /// Install a timed team effect.
    Install {
        slot: EffectSlot,
        value: u32,
        rounds: u8,
    },
}

impl SupportItem {
    pub const fn effects(self) -> &'static [ItemEffect] {
        match self {
            Self::GhostUsher => &[ItemEffect::DelayEnemy],
            Self::Android8 => &[
                ItemEffect::Heal { pct: 70 },
                ItemEffect::Install {
                    slot: EffectSlot::AndroidGuard,
                    value: 50,
                    rounds: 2,
                },
            ],
            Self::PrincessSnake => &[
                ItemEffect::Heal { pct: 55 },
                ItemEffect::Install {
                    slot: EffectSlot::SnakeReduction,
                    value: 30,
                    rounds: 1,
                },
            ],
            Self::Whis => &[ItemEffect::Install {
                slot: EffectSlot::WhisReduction,
                value: 40,
                rounds: 2,
            }],
        }
    }
}

/// Remaining uses per item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: [u8; SupportItem::COUNT],
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `uses` of every item.
    pub fn uniform(uses: u8) -> Self {
        Self {
            counts: [uses; SupportItem::COUNT],
        }
    }

    pub fn with(mut self, item: SupportItem, uses: u8) -> Self {
        self.counts[item as usize] = uses;
        self
    }

    pub fn count(&self, item: SupportItem) -> u8 {
        self.counts[item as usize]
    }

    /// Consumes one use. Returns false when none are left.
    pub fn take(&mut self, item: SupportItem) -> bool {
        let count = &mut self.counts[item as usize];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SupportItem, u8)> + '_ {
        SupportItem::iter().map(|item| (item, self.count(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_stops_at_zero() {
        let mut inv = Inventory::uniform(2);
        assert!(inv.take(SupportItem::Whis));
        assert!(inv.take(SupportItem::Whis));
        assert!(!inv.take(SupportItem::Whis));
        assert_eq!(inv.count(SupportItem::Whis), 0);
        assert_eq!(inv.count(SupportItem::GhostUsher), 2);
    }

    #[test]
    fn every_item_has_an_effect() {
        for item in SupportItem::iter() {
            assert!(!item.effects().is_empty(), "{item}");
        }
    }

    #[test]
    fn empty_inventory() {
        assert!(Inventory::empty().is_empty());
        assert!(!Inventory::empty().with(SupportItem::Android8, 1).is_empty());
    }
}
