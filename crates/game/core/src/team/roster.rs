use arrayvec::ArrayVec;

use super::effects::{EffectCategory, TeamEffects};
use super::rotation::Rotation;
use crate::config::BattleConfig;
use crate::error::InvariantError;
use crate::state::{Categories, Combatant};
use crate::stats::Meter;

/// How a side takes damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageModel {
    /// All hits drain one shared HP pool; members never fall individually.
    Pooled,
    /// Each member has its own HP; the side falls when all members have.
    PerMember,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpPool {
    pub total: u64,
    pub max: u64,
}

impl HpPool {
    pub fn pct(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        (u128::from(self.total) * 100 / u128::from(self.max)) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub(super) members: ArrayVec<Combatant, { BattleConfig::MAX_MEMBERS }>,
    pub(super) rotation: Rotation,
    pub(super) pool: HpPool,
    pub(super) effects: TeamEffects,
    pub(super) bonuses_applied: bool,
    model: DamageModel,
    /// Bonus-mode meter shared by the whole side.
    pub momentum: Meter,
}

impl Team {
    pub fn new(model: DamageModel) -> Self {
        Self {
            members: ArrayVec::new(),
            rotation: Rotation::default(),
            pool: HpPool::default(),
            effects: TeamEffects::default(),
            bonuses_applied: false,
            model,
            momentum: Meter::empty(),
        }
    }

    pub fn pooled() -> Self {
        Self::new(DamageModel::Pooled)
    }

    pub fn per_member() -> Self {
        Self::new(DamageModel::PerMember)
    }

    /// Appends a member and grows the pool by its HP.
    pub fn add_member(&mut self, mut member: Combatant) -> Result<usize, InvariantError> {
        if self.members.is_full() {
            return Err(InvariantError::TeamFull {
                capacity: BattleConfig::MAX_MEMBERS,
            });
        }
        member.recompute_derived();
        self.pool.max += member.max_hp;
        self.pool.total += member.hp;
        self.members.push(member);
        Ok(self.members.len() - 1)
    }

    /// Builder form of [`Team::add_member`].
    pub fn with_member(mut self, member: Combatant) -> Result<Self, InvariantError> {
        self.add_member(member)?;
        Ok(self)
    }

    pub fn model(&self) -> DamageModel {
        self.model
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Combatant] {
        &mut self.members
    }

    pub fn member(&self, index: usize) -> Result<&Combatant, InvariantError> {
        let len = self.members.len();
        self.members
            .get(index)
            .ok_or(InvariantError::MemberOutOfRange { index, len })
    }

    pub fn member_mut(&mut self, index: usize) -> Result<&mut Combatant, InvariantError> {
        let len = self.members.len();
        self.members
            .get_mut(index)
            .ok_or(InvariantError::MemberOutOfRange { index, len })
    }

    /// Member `index` together with the side's momentum meter.
    pub fn member_with_momentum(
        &mut self,
        index: usize,
    ) -> Result<(&mut Combatant, &mut Meter), InvariantError> {
        let len = self.members.len();
        let member = self
            .members
            .get_mut(index)
            .ok_or(InvariantError::MemberOutOfRange { index, len })?;
        Ok((member, &mut self.momentum))
    }

    pub fn pool(&self) -> HpPool {
        self.pool
    }

    pub fn effects(&self) -> &TeamEffects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut TeamEffects {
        &mut self.effects
    }

    pub fn bonuses_applied(&self) -> bool {
        self.bonuses_applied
    }

    /// Side HP ratio in percent: the pool for pooled sides, summed member HP
    /// otherwise.
    pub fn hp_pct(&self) -> u32 {
        match self.model {
            DamageModel::Pooled => self.pool.pct(),
            DamageModel::PerMember => HpPool {
                total: self.members.iter().map(|m| m.hp).sum(),
                max: self.members.iter().map(|m| m.max_hp).sum(),
            }
            .pct(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        match self.model {
            DamageModel::Pooled => self.pool.total == 0,
            DamageModel::PerMember => !self.members.iter().any(Combatant::is_alive),
        }
    }

    pub fn living(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_alive())
            .map(|(i, _)| i)
    }

    /// Living members of the active rotation, in slot order.
    pub fn active_living(&self) -> ArrayVec<usize, { BattleConfig::ROTATION_SIZE }> {
        self.rotation
            .active()
            .iter()
            .copied()
            .filter(|&i| self.members.get(i).is_some_and(Combatant::is_alive))
            .collect()
    }

    /// Union of categories over living members.
    pub fn living_categories(&self) -> Categories {
        self.members
            .iter()
            .filter(|m| m.is_alive())
            .fold(Categories::empty(), |acc, m| acc | m.categories)
    }

    /// Restores HP. Pooled sides heal the pool; otherwise member `index`.
    ///
    /// Returns the HP actually restored.
    pub fn recover(&mut self, index: usize, amount: u64) -> Result<u64, InvariantError> {
        match self.model {
            DamageModel::Pooled => {
                let healed = amount.min(self.pool.max - self.pool.total);
                self.pool.total += healed;
                Ok(healed)
            }
            DamageModel::PerMember => {
                let member = self.member_mut(index)?;
                if !member.is_alive() {
                    return Ok(0);
                }
                let healed = amount.min(member.max_hp - member.hp);
                member.hp += healed;
                Ok(healed)
            }
        }
    }

    /// Heals `pct` percent of the pool maximum. Per-member sides heal every
    /// living member by `pct` of its own maximum.
    pub fn recover_pct(&mut self, pct: u32) -> u64 {
        match self.model {
            DamageModel::Pooled => {
                let amount = crate::stats::scale_pct(self.pool.max, u64::from(pct));
                let healed = amount.min(self.pool.max - self.pool.total);
                self.pool.total += healed;
                healed
            }
            DamageModel::PerMember => self
                .members
                .iter_mut()
                .filter(|m| m.is_alive())
                .map(|m| {
                    let amount = crate::stats::scale_pct(m.max_hp, u64::from(pct));
                    let healed = amount.min(m.max_hp - m.hp);
                    m.hp += healed;
                    healed
                })
                .sum(),
        }
    }

    /// Pooled damage path.
    ///
    /// Applies the domain multiplier, the summed damage-reduction effects as
    /// one factor and the summed defense boosts at half weight, truncates,
    /// and subtracts from the pool. Returns the HP actually lost.
    pub fn absorb(&mut self, raw: u64) -> u64 {
        let domain = if self.effects.is_active(EffectCategory::Domain) {
            BattleConfig::DOMAIN_DAMAGE_PCT
        } else {
            100
        };
        let reduction = u128::from(self.effects.total(EffectCategory::DamageReduction).min(100));
        let guard = u128::from(self.effects.total(EffectCategory::DefenseBoost).min(200));

        let scaled = u128::from(raw) * u128::from(domain) * (100 - reduction) * (200 - guard);
        let damage = u64::try_from(scaled / (100 * 100 * 200)).unwrap_or(u64::MAX);

        let lost = damage.min(self.pool.total);
        self.pool.total -= lost;
        lost
    }

    /// Resets the pool to the sum of member HP.
    pub(super) fn recompute_pool(&mut self) {
        self.pool.max = self.members.iter().map(|m| m.max_hp).sum();
        self.pool.total = self.pool.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attribute;
    use crate::team::EffectSlot;

    fn pooled(hp: u64) -> Team {
        let mut team = Team::pooled();
        team.add_member(Combatant::new("a", Attribute::Str, hp, 1, 1))
            .unwrap();
        team
    }

    #[test]
    fn reductions_sum_within_category() {
        let mut team = pooled(10_000);
        team.effects_mut().install(EffectSlot::SnakeReduction, 30, 1);
        team.effects_mut().install(EffectSlot::WhisReduction, 40, 2);
        assert_eq!(team.absorb(1_000), 300);
    }

    #[test]
    fn defense_boost_is_a_second_half_weight_factor() {
        let mut team = pooled(10_000);
        team.effects_mut().install(EffectSlot::SnakeReduction, 30, 1);
        team.effects_mut().install(EffectSlot::WhisReduction, 40, 2);
        team.effects_mut().install(EffectSlot::AndroidGuard, 50, 2);
        assert_eq!(team.absorb(1_000), 225);
    }

    #[test]
    fn domain_amplifies_incoming_damage() {
        let mut team = pooled(10_000);
        team.effects_mut().install(EffectSlot::Domain, 0, 5);
        assert_eq!(team.absorb(1_000), 1_300);
    }

    #[test]
    fn absorb_floors_pool_at_zero() {
        let mut team = pooled(500);
        assert_eq!(team.absorb(2_000), 500);
        assert_eq!(team.pool().total, 0);
        assert!(team.is_defeated());
    }

    #[test]
    fn pool_tracks_members_and_caps_heals() {
        let mut team = pooled(1_000);
        team.add_member(Combatant::new("b", Attribute::Agl, 3_000, 1, 1))
            .unwrap();
        assert_eq!(team.pool(), HpPool { total: 4_000, max: 4_000 });

        team.absorb(2_000);
        assert_eq!(team.recover_pct(70), 2_000);
        assert_eq!(team.pool().total, 4_000);
    }

    #[test]
    fn seventh_member_is_rejected() {
        let mut team = Team::per_member();
        for i in 0..6 {
            team.add_member(Combatant::new(format!("m{i}"), Attribute::Phy, 1, 1, 1))
                .unwrap();
        }
        assert_eq!(
            team.add_member(Combatant::new("x", Attribute::Phy, 1, 1, 1)),
            Err(InvariantError::TeamFull { capacity: 6 })
        );
    }

    #[test]
    fn per_member_side_falls_with_last_member() {
        let mut team = Team::per_member();
        team.add_member(Combatant::new("a", Attribute::Str, 10, 1, 1))
            .unwrap();
        team.add_member(Combatant::new("b", Attribute::Str, 10, 1, 1))
            .unwrap();
        team.member_mut(0).unwrap().take_damage(100);
        assert!(!team.is_defeated());
        team.member_mut(1).unwrap().take_damage(100);
        assert!(team.is_defeated());
    }
}
