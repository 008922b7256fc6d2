//! Timed team-wide effects in a fixed slot table.
//!
//! Each slot holds at most one effect; re-installing refreshes it. Effects
//! in the same category add up before they are applied.

use arrayvec::ArrayVec;
use strum::{EnumCount, IntoEnumIterator};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSlot {
    AndroidGuard,
    SnakeReduction,
    WhisReduction,
    Domain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectCategory {
    DamageReduction,
    DefenseBoost,
    Domain,
}

impl EffectSlot {
    pub const fn category(self) -> EffectCategory {
        match self {
            Self::AndroidGuard => EffectCategory::DefenseBoost,
            Self::SnakeReduction | Self::WhisReduction => EffectCategory::DamageReduction,
            Self::Domain => EffectCategory::Domain,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    /// Percent value; unused by the domain.
    pub value: u32,
    /// Rounds left, including the current one.
    pub remaining: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamEffects {
    slots: [Option<TimedEffect>; EffectSlot::COUNT],
}

impl TeamEffects {
    /// Installs or refreshes `slot`. A zero duration clears it.
    pub fn install(&mut self, slot: EffectSlot, value: u32, rounds: u8) {
        self.slots[slot as usize] = (rounds > 0).then_some(TimedEffect {
            value,
            remaining: rounds,
        });
    }

    pub fn get(&self, slot: EffectSlot) -> Option<TimedEffect> {
        self.slots[slot as usize]
    }

    pub fn remove(&mut self, slot: EffectSlot) {
        self.slots[slot as usize] = None;
    }

    pub fn total(&self, category: EffectCategory) -> u32 {
        self.iter()
            .filter(|(slot, _)| slot.category() == category)
            .map(|(_, effect)| effect.value)
            .sum()
    }

    pub fn is_active(&self, category: EffectCategory) -> bool {
        self.iter().any(|(slot, _)| slot.category() == category)
    }

    /// Advances every effect by one round and removes the exhausted ones.
    pub fn tick(&mut self) -> ArrayVec<EffectSlot, { EffectSlot::COUNT }> {
        let mut expired = ArrayVec::new();
        for slot in EffectSlot::iter() {
            if let Some(effect) = &mut self.slots[slot as usize] {
                effect.remaining = effect.remaining.saturating_sub(1);
                if effect.remaining == 0 {
                    self.slots[slot as usize] = None;
                    expired.push(slot);
                }
            }
        }
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = (EffectSlot, TimedEffect)> + '_ {
        EffectSlot::iter().filter_map(|slot| self.slots[slot as usize].map(|e| (slot, e)))
    }
}
