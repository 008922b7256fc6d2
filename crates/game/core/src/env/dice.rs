use std::sync::Arc;

use super::rng::{PcgRng, RngOracle, compute_seed};

/// Purpose of a roll; mixed into the per-roll seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Evasion = 1,
    Critical = 2,
    Stun = 3,
    Jitter = 4,
    Sphere = 5,
    Rainbow = 6,
    EnemyTarget = 7,
    EnemySuper = 8,
    EnemyOrder = 9,
    Counter = 10,
    AdditionalAttack = 11,
}

/// Stateful roller over a stateless [`RngOracle`].
///
/// Every draw consumes one nonce, including draws whose outcome is already
/// decided (0% and 100% chances), so the roll sequence never depends on
/// which branch a previous roll took.
#[derive(Clone)]
pub struct Dice {
    oracle: Arc<dyn RngOracle>,
    seed: u64,
    nonce: u64,
}

impl Dice {
    pub fn new(oracle: Arc<dyn RngOracle>, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
        }
    }

    /// Dice backed by [`PcgRng`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(PcgRng), seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn draw(&mut self, context: RollContext) -> u32 {
        let seed = compute_seed(self.seed, self.nonce, context as u32);
        self.nonce += 1;
        self.oracle.next_u32(seed)
    }

    /// Percent chance check. Passes when a d100 roll is at most `pct`.
    pub fn chance(&mut self, pct: u32, context: RollContext) -> bool {
        let roll = self.draw(context) % 100 + 1;
        match pct {
            0 => false,
            p if p >= 100 => true,
            p => roll <= p,
        }
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    pub fn pick(&mut self, len: usize, context: RollContext) -> usize {
        let value = self.draw(context) as usize;
        if len == 0 { 0 } else { value % len }
    }

    /// Damage variance factor in [0.95, 1.05].
    pub fn jitter(&mut self) -> f64 {
        let step = self.draw(RollContext::Jitter) % 1_001;
        f64::from(9_500 + step) / 10_000.0
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T], context: RollContext) {
        for i in (1..items.len()).rev() {
            let j = self.pick(i + 1, context);
            items.swap(i, j);
        }
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Dice::seeded(77);
        let mut b = Dice::seeded(77);
        for _ in 0..64 {
            assert_eq!(
                a.pick(1_000, RollContext::Sphere),
                b.pick(1_000, RollContext::Sphere)
            );
        }
    }

    #[test]
    fn chance_bounds_ignore_roll() {
        let mut dice = Dice::new(Arc::new(FixedRng(0)), 0);
        assert!(!dice.chance(0, RollContext::Critical));
        let mut dice = Dice::new(Arc::new(FixedRng(99)), 0);
        assert!(dice.chance(100, RollContext::Critical));
        assert!(!dice.chance(99, RollContext::Critical));
    }

    #[test]
    fn every_draw_advances_nonce() {
        let mut dice = Dice::seeded(1);
        dice.chance(0, RollContext::Stun);
        dice.chance(100, RollContext::Stun);
        dice.jitter();
        assert_eq!(dice.nonce(), 3);
    }

    #[test]
    fn jitter_within_bounds() {
        let mut dice = Dice::seeded(5);
        for _ in 0..2_000 {
            let j = dice.jitter();
            assert!((0.95..=1.05).contains(&j), "jitter {j} out of range");
        }
        assert_eq!(Dice::new(Arc::new(FixedRng(0)), 0).jitter(), 0.95);
        assert_eq!(Dice::new(Arc::new(FixedRng(1_000)), 0).jitter(), 1.05);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut dice = Dice::seeded(9);
        let mut items = [0, 1, 2, 3, 4, 5];
        dice.shuffle(&mut items, RollContext::EnemyOrder);
        let mut sorted = items;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5]);
    }
}
