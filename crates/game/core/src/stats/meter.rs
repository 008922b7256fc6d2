use crate::config::BattleConfig;
use crate::error::{ErrorContext, InvariantError};

/// Capped resource counter in `0..=MAX_ENERGY`.
///
/// Used both for per-member energy and the side-wide bonus-mode momentum.
/// Additions clamp at the cap; spending more than is held is an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    value: u8,
}

impl Meter {
    pub const CAP: u8 = BattleConfig::MAX_ENERGY;

    pub const fn empty() -> Self {
        Self { value: 0 }
    }

    pub fn new(value: u32) -> Self {
        let mut meter = Self::empty();
        meter.set(value);
        meter
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.min(u32::from(Self::CAP)) as u8;
    }

    /// Adds `amount`, clamping at the cap. Returns how much was actually added.
    pub fn add(&mut self, amount: u32) -> u8 {
        let before = self.value;
        self.set(u32::from(before).saturating_add(amount));
        self.value - before
    }

    /// Empties the meter, returning the previous value.
    pub fn drain(&mut self) -> u8 {
        core::mem::take(&mut self.value)
    }

    pub fn spend(&mut self, amount: u8) -> Result<(), InvariantError> {
        if amount > self.value {
            return Err(InvariantError::EnergyUnderflow {
                have: self.value,
                need: amount,
                context: ErrorContext::default(),
            });
        }
        self.value -= amount;
        Ok(())
    }

    pub const fn is_full(&self) -> bool {
        self.value >= Self::CAP
    }

    pub const fn at_least(&self, threshold: u8) -> bool {
        self.value >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_clamps_at_cap() {
        let mut meter = Meter::new(20);
        assert_eq!(meter.add(10), 4);
        assert_eq!(meter.value(), 24);
        assert!(meter.is_full());
        assert_eq!(meter.add(1), 0);
    }

    #[test]
    fn huge_additions_saturate() {
        let mut meter = Meter::new(3);
        assert_eq!(meter.add(u32::MAX), 21);
        assert_eq!(meter.value(), Meter::CAP);
    }

    #[test]
    fn new_clamps_oversized_values() {
        assert_eq!(Meter::new(1_000).value(), Meter::CAP);
    }

    #[test]
    fn drain_resets_to_zero() {
        let mut meter = Meter::new(19);
        assert_eq!(meter.drain(), 19);
        assert_eq!(meter.value(), 0);
    }

    #[test]
    fn spend_rejects_underflow() {
        let mut meter = Meter::new(5);
        assert!(matches!(
            meter.spend(12),
            Err(InvariantError::EnergyUnderflow { have: 5, need: 12, .. })
        ));
        assert_eq!(meter.value(), 5);
        meter.spend(5).unwrap();
        assert_eq!(meter.value(), 0);
    }
}
