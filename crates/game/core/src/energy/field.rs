//! The shared sphere field and the harvest operation.

use std::collections::VecDeque;

use crate::config::BattleConfig;
use crate::env::{Dice, RollContext};
use crate::state::{Attribute, Combatant};
use crate::stats::Meter;

/// One energy sphere on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere(pub Attribute);

impl Sphere {
    pub fn roll(dice: &mut Dice, rainbow_pct: u32) -> Self {
        if dice.chance(rainbow_pct, RollContext::Rainbow) {
            return Self(Attribute::Rainbow);
        }
        let index = dice.pick(Attribute::COLORS.len(), RollContext::Sphere);
        Self(Attribute::COLORS[index])
    }

    /// Energy yield for a harvester of `attribute`: 2 on a colour match,
    /// otherwise 1. Rainbow always yields 1.
    pub fn yield_for(self, attribute: Attribute) -> u32 {
        if self.0.is_color() && self.0 == attribute {
            2
        } else {
            1
        }
    }
}

/// Path over the field requested by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSpec {
    /// The first `n` spheres; clamped to `1..=max_path_len` and the field size.
    Prefix(usize),
    /// Explicit distinct positions, taken in the given order.
    Indices(Vec<usize>),
}

/// Positions actually harvested, after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPath {
    pub indices: Vec<usize>,
    /// True when the requested path was rejected and the fallback was used.
    pub fell_back: bool,
}

/// Harvest limits, taken from [`BattleConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestRules {
    pub max_path_len: usize,
    pub fallback_path_len: usize,
    pub rainbow_chance_pct: u32,
}

impl From<&BattleConfig> for HarvestRules {
    fn from(config: &BattleConfig) -> Self {
        Self {
            max_path_len: config.max_path_len,
            fallback_path_len: config.fallback_path_len,
            rainbow_chance_pct: config.rainbow_chance_pct,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnergyField {
    spheres: VecDeque<Sphere>,
    capacity: usize,
}

impl EnergyField {
    pub fn new(capacity: usize) -> Self {
        Self {
            spheres: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn filled(capacity: usize, dice: &mut Dice, rainbow_pct: u32) -> Self {
        let mut field = Self::new(capacity);
        field.refill(dice, rainbow_pct);
        field
    }

    /// Field with a fixed sphere layout. Capacity is the layout length.
    pub fn from_spheres(spheres: impl IntoIterator<Item = Sphere>) -> Self {
        let spheres: VecDeque<_> = spheres.into_iter().collect();
        Self {
            capacity: spheres.len(),
            spheres,
        }
    }

    /// Tops the field back up to capacity with freshly rolled spheres.
    pub fn refill(&mut self, dice: &mut Dice, rainbow_pct: u32) {
        while self.spheres.len() < self.capacity {
            self.spheres.push_back(Sphere::roll(dice, rainbow_pct));
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.spheres.iter()
    }

    /// Validates `path` against the current field.
    ///
    /// Prefixes are clamped; explicit index lists that are empty, too long,
    /// out of range or repeat a position fall back to the configured prefix.
    pub fn resolve(&self, path: &PathSpec, rules: &HarvestRules) -> ResolvedPath {
        let limit = rules.max_path_len.min(self.len());
        let prefix = |n: usize| -> Vec<usize> {
            let len = n.clamp(1, limit.max(1)).min(self.len());
            (0..len).collect()
        };
        match path {
            PathSpec::Prefix(n) => ResolvedPath {
                indices: prefix(*n),
                fell_back: false,
            },
            PathSpec::Indices(indices) => {
                let valid = !indices.is_empty()
                    && indices.len() <= limit
                    && indices.iter().all(|&i| i < self.len())
                    && indices
                        .iter()
                        .enumerate()
                        .all(|(k, i)| !indices[..k].contains(i));
                if valid {
                    ResolvedPath {
                        indices: indices.clone(),
                        fell_back: false,
                    }
                } else {
                    ResolvedPath {
                        indices: prefix(rules.fallback_path_len),
                        fell_back: true,
                    }
                }
            }
        }
    }

    /// Removes the spheres at `path.indices`, returned in path order.
    pub fn take(&mut self, path: &ResolvedPath) -> Vec<Sphere> {
        let taken: Vec<Sphere> = path
            .indices
            .iter()
            .filter_map(|&i| self.spheres.get(i).copied())
            .collect();
        let mut positions = path.indices.clone();
        positions.sort_unstable_by(|a, b| b.cmp(a));
        for i in positions {
            self.spheres.remove(i);
        }
        taken
    }
}

/// Result of one harvest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnergyGain {
    pub spheres: Vec<Sphere>,
    /// Raw yield before clamping.
    pub gain: u32,
    pub energy_added: u8,
    pub momentum_added: u8,
    pub fell_back: bool,
}

/// Takes `path` from the field into `combatant`'s energy and the side's
/// `momentum`, then refills the field.
pub fn harvest(
    field: &mut EnergyField,
    combatant: &mut Combatant,
    momentum: &mut Meter,
    path: &PathSpec,
    rules: &HarvestRules,
    dice: &mut Dice,
) -> EnergyGain {
    let resolved = field.resolve(path, rules);
    let spheres = field.take(&resolved);
    let gain: u32 = spheres
        .iter()
        .map(|s| s.yield_for(combatant.attribute))
        .sum();
    let energy_added = combatant.energy.add(gain);
    let momentum_added = momentum.add(gain);
    field.refill(dice, rules.rainbow_chance_pct);

    EnergyGain {
        spheres,
        gain,
        energy_added,
        momentum_added,
        fell_back: resolved.fell_back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::env::FixedRng;

    fn rules() -> HarvestRules {
        HarvestRules::from(&BattleConfig::default())
    }

    fn field(layout: &[Attribute]) -> EnergyField {
        EnergyField::from_spheres(layout.iter().copied().map(Sphere))
    }

    #[test]
    fn matching_colour_yields_double() {
        assert_eq!(Sphere(Attribute::Int).yield_for(Attribute::Int), 2);
        assert_eq!(Sphere(Attribute::Str).yield_for(Attribute::Int), 1);
        assert_eq!(Sphere(Attribute::Rainbow).yield_for(Attribute::Int), 1);
    }

    #[test]
    fn prefix_is_clamped_to_path_limit_and_field() {
        let f = field(&[Attribute::Str; 10]);
        assert_eq!(f.resolve(&PathSpec::Prefix(0), &rules()).indices, vec![0]);
        assert_eq!(f.resolve(&PathSpec::Prefix(99), &rules()).indices.len(), 7);

        let small = field(&[Attribute::Str; 3]);
        assert_eq!(
            small.resolve(&PathSpec::Prefix(7), &rules()).indices,
            vec![0, 1, 2]
        );
    }

    #[test]
    fn invalid_index_paths_fall_back() {
        let f = field(&[Attribute::Str; 10]);
        for bad in [vec![], vec![1, 1], vec![3, 42], (0..8).collect::<Vec<_>>()] {
            let resolved = f.resolve(&PathSpec::Indices(bad), &rules());
            assert!(resolved.fell_back);
            assert_eq!(resolved.indices, vec![0, 1, 2, 3]);
        }
        let ok = f.resolve(&PathSpec::Indices(vec![5, 2]), &rules());
        assert!(!ok.fell_back);
    }

    #[test]
    fn take_preserves_path_order() {
        let mut f = field(&[Attribute::Str, Attribute::Agl, Attribute::Teq, Attribute::Int]);
        let path = f.resolve(&PathSpec::Indices(vec![3, 0]), &rules());
        let taken = f.take(&path);
        assert_eq!(taken, vec![Sphere(Attribute::Int), Sphere(Attribute::Str)]);
        let left: Vec<_> = f.spheres().copied().collect();
        assert_eq!(left, vec![Sphere(Attribute::Agl), Sphere(Attribute::Teq)]);
    }

    #[test]
    fn harvest_clamps_and_refills() {
        let mut dice = Dice::new(Arc::new(FixedRng(99)), 0);
        let mut f = EnergyField::from_spheres([Sphere(Attribute::Phy); 24]);
        let mut c = Combatant::new("h", Attribute::Phy, 1, 1, 1).with_energy(20);
        let mut momentum = Meter::new(22);

        let gain = harvest(&mut f, &mut c, &mut momentum, &PathSpec::Prefix(7), &rules(), &mut dice);

        assert_eq!(gain.gain, 14);
        assert_eq!(gain.energy_added, 4);
        assert_eq!(c.energy.value(), 24);
        assert_eq!(momentum.value(), 24);
        assert_eq!(f.len(), 24);
    }

    #[test]
    fn filled_field_reaches_capacity() {
        let mut dice = Dice::seeded(3);
        let f = EnergyField::filled(24, &mut dice, 10);
        assert_eq!(f.len(), 24);
    }
}
