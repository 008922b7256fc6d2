//! Stateless random sources.
//!
//! An oracle maps a seed to one 32-bit value. [`super::Dice`] derives the
//! seed for every roll from the battle seed, a roll counter and the roll's
//! purpose, so an oracle never needs to remember anything.

/// Seed-to-value function behind every roll.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG-XSH-RR: one LCG step on the seed, then xorshift and a random rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        const MUL: u64 = 6_364_136_223_846_793_005;
        const INC: u64 = 1_442_695_040_888_963_407;

        let state = seed.wrapping_mul(MUL).wrapping_add(INC);
        let shifted = (((state >> 18) ^ state) >> 27) as u32;
        shifted.rotate_right((state >> 59) as u32)
    }
}

/// Answers every roll with the same value.
///
/// `FixedRng(0)` passes every non-zero chance and picks index 0;
/// `FixedRng(99)` fails every chance below 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Seed for one roll: battle seed, roll counter and roll purpose folded
/// through a murmur-style finaliser.
pub fn compute_seed(battle_seed: u64, nonce: u64, context: u32) -> u64 {
    let mixed = battle_seed
        ^ nonce.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ u64::from(context).wrapping_mul(0x517c_c1b7_2722_0a95);
    let mixed = (mixed ^ (mixed >> 33)).wrapping_mul(0xff51_afd7_ed55_8ccd);
    mixed ^ (mixed >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_a_pure_function_of_the_seed() {
        assert_eq!(PcgRng.next_u32(42), PcgRng.next_u32(42));
        assert_ne!(PcgRng.next_u32(42), PcgRng.next_u32(43));
    }

    #[test]
    fn seed_depends_on_every_component() {
        let base = compute_seed(1, 2, 3);
        assert_ne!(base, compute_seed(9, 2, 3));
        assert_ne!(base, compute_seed(1, 9, 3));
        assert_ne!(base, compute_seed(1, 2, 9));
    }

    #[test]
    fn consecutive_nonces_spread_out() {
        let values: Vec<u32> = (0..64)
            .map(|nonce| PcgRng.next_u32(compute_seed(7, nonce, 1)) % 100)
            .collect();
        let distinct = values
            .iter()
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        assert!(distinct > 20, "only {distinct} distinct rolls");
    }
}
