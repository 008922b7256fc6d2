/// Accumulated buffs on a combatant.
///
/// Everything except the flat bonuses is turn-scoped and cleared by
/// [`Buffs::reset_turn`]. Flat bonuses come from charged attacks and hits
/// received and persist for the whole battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buffs {
    pub atk_pct: u32,
    pub def_pct: u32,
    pub link_atk_pct: u32,
    pub link_evasion_pct: u32,
    pub link_energy: u32,
    pub crit_pct: u32,
    pub dodge_pct: u32,
    pub reduction_pct: u32,
    pub additional_attack_pct: u32,
    pub effective_against_all: bool,

    pub flat_atk: u64,
    pub flat_def: u64,
}

impl Buffs {
    /// Clears turn-scoped buffs, keeping permanent flat bonuses.
    pub fn reset_turn(&mut self) {
        *self = Self {
            flat_atk: self.flat_atk,
            flat_def: self.flat_def,
            ..Self::default()
        };
    }

    /// Clears link-sourced buffs only.
    pub fn clear_links(&mut self) {
        self.link_atk_pct = 0;
        self.link_evasion_pct = 0;
        self.link_energy = 0;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivedStats {
    pub attack: u64,
    pub defense: u64,
}

/// `value * pct / 100`, saturating.
pub fn scale_pct(value: u64, pct: u64) -> u64 {
    value.saturating_mul(pct) / 100
}

fn layered(base: u64, pct: u32, link_pct: u32, flat: u64) -> u64 {
    let scaled = u128::from(base) * u128::from(100 + pct) * u128::from(100 + link_pct) / 10_000;
    u64::try_from(scaled)
        .unwrap_or(u64::MAX)
        .saturating_add(flat)
}

/// `base * (1 + pct) * (1 + link pct) + flat`, per stat. Links only grant
/// attack percent, so defense skips the link layer.
pub fn derive_stats(base_attack: u64, base_defense: u64, buffs: &Buffs) -> DerivedStats {
    DerivedStats {
        attack: layered(base_attack, buffs.atk_pct, buffs.link_atk_pct, buffs.flat_atk),
        defense: layered(base_defense, buffs.def_pct, 0, buffs.flat_def),
    }
}
