use arrayvec::ArrayVec;

use crate::state::Categories;

/// Stat scaling and energy grant for members matched by a leader skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boost {
    /// HP/ATK/DEF multiplier in percent (`250` = x2.5).
    pub stat_pct: u64,
    pub energy: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleRule {
    pub categories: Categories,
    pub boost: Boost,
}

/// Team-wide stat scaling applied once at battle setup.
///
/// Members carrying any `primary` category get the primary boost, and
/// additionally the `secondary` boost if they also match it. Every other
/// member gets the `fallback` boost when one is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderSkill {
    pub name: &'static str,
    pub primary: ScaleRule,
    pub secondary: Option<ScaleRule>,
    pub fallback: Option<Boost>,
}

impl LeaderSkill {
    pub fn boosts_for(&self, categories: Categories) -> ArrayVec<Boost, 2> {
        let mut boosts = ArrayVec::new();
        if categories.intersects(self.primary.categories) {
            boosts.push(self.primary.boost);
            if let Some(secondary) = self.secondary
                && categories.intersects(secondary.categories)
            {
                boosts.push(secondary.boost);
            }
        } else if let Some(fallback) = self.fallback {
            boosts.push(fallback);
        }
        boosts
    }
}
