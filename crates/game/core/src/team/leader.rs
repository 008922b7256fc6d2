use super::roster::Team;
use crate::error::InvariantError;

impl Team {
    /// Applies the leader's skill to every member, exactly once per battle.
    ///
    /// Scales matched members' HP and base stats, grants energy, resets every
    /// member to full HP and rebuilds the pool. Teams without a leader skill
    /// are only marked as done. Returns whether a skill was applied.
    pub fn apply_leader_bonus(&mut self) -> Result<bool, InvariantError> {
        if self.bonuses_applied {
            return Err(InvariantError::LeaderBonusReapplied);
        }
        self.bonuses_applied = true;

        let Some(skill) = self
            .members
            .iter()
            .find(|m| m.is_leader)
            .and_then(|m| m.kit.leader)
        else {
            return Ok(false);
        };

        tracing::debug!(leader = skill.name, "applying leader skill");
        for member in self.members.iter_mut() {
            for boost in skill.boosts_for(member.categories) {
                member.scale_base(boost.stat_pct);
                member.energy.add(boost.energy);
            }
            member.hp = member.max_hp;
            member.recompute_derived();
        }
        self.recompute_pool();
        Ok(true)
    }
}
