use super::roster::Team;
use crate::config::BattleConfig;
use crate::error::InvariantError;
use crate::state::{Combatant, LinkEffect, LinkSkills};

const MAX: usize = BattleConfig::MAX_MEMBERS;

/// Symmetric adjacency over members sharing at least one link skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkGraph {
    size: usize,
    edges: [[bool; MAX]; MAX],
}

impl LinkGraph {
    pub fn build(members: &[Combatant]) -> Self {
        let size = members.len().min(MAX);
        let mut edges = [[false; MAX]; MAX];
        for i in 0..size {
            for j in (i + 1)..size {
                let shared = members[i].links.intersects(members[j].links);
                edges[i][j] = shared;
                edges[j][i] = shared;
            }
        }
        Self { size, edges }
    }

    pub fn linked(&self, a: usize, b: usize) -> bool {
        a < self.size && b < self.size && self.edges[a][b]
    }

    pub fn partners(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&j| self.linked(index, j))
    }

    /// Unordered edges `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| ((i + 1)..self.size).map(move |j| (i, j)))
            .filter(|&(i, j)| self.edges[i][j])
    }
}

impl Team {
    pub fn link_adjacency(&self) -> LinkGraph {
        LinkGraph::build(&self.members)
    }

    /// Two energy per living linked teammate anywhere in the roster.
    pub fn link_partner_bonus(&self, index: usize) -> u32 {
        let graph = self.link_adjacency();
        let alive = graph
            .partners(index)
            .filter(|&j| self.members[j].is_alive())
            .count() as u32;
        alive * 2
    }

    /// Links `index` shares with living teammates in the active rotation.
    pub fn active_links(&self, index: usize) -> Result<LinkSkills, InvariantError> {
        let own = self.member(index)?.links;
        Ok(self
            .active_living()
            .into_iter()
            .filter(|&j| j != index)
            .fold(LinkSkills::empty(), |acc, j| acc | (own & self.members[j].links)))
    }

    /// Recomputes link buffs for `index` from scratch.
    pub fn apply_link_bonuses(&mut self, index: usize) -> Result<LinkSkills, InvariantError> {
        let links = self.active_links(index)?;
        let member = self.member_mut(index)?;
        member.buffs.clear_links();
        for effect in links.effects() {
            match effect {
                LinkEffect::Energy(n) => member.buffs.link_energy += n,
                LinkEffect::AtkPercent(pct) => member.buffs.link_atk_pct += pct,
                LinkEffect::EvasionPercent(pct) => member.buffs.link_evasion_pct += pct,
            }
        }
        member.recompute_derived();
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Attribute;

    fn linked(name: &str, links: LinkSkills) -> Combatant {
        Combatant::new(name, Attribute::Teq, 100, 1_000, 1_000).with_links(links)
    }

    fn team(members: Vec<Combatant>) -> Team {
        let mut team = Team::pooled();
        for m in members {
            team.add_member(m).unwrap();
        }
        team.setup_rotation();
        team
    }

    #[test]
    fn adjacency_is_symmetric_and_irreflexive() {
        let t = team(vec![
            linked("a", LinkSkills::FIERCE_BATTLE | LinkSkills::NIGHTMARE),
            linked("b", LinkSkills::NIGHTMARE),
            linked("c", LinkSkills::DISMAL_FUTURE),
        ]);
        let graph = t.link_adjacency();
        assert!(graph.linked(0, 1) && graph.linked(1, 0));
        assert!(!graph.linked(0, 0));
        assert!(!graph.linked(0, 2));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(t.link_partner_bonus(0), 2);
    }

    #[test]
    fn bonuses_come_only_from_active_teammates() {
        let shared = LinkSkills::FIERCE_BATTLE | LinkSkills::PREPARED_FOR_BATTLE;
        let mut t = team(vec![
            linked("a", shared),
            linked("b", LinkSkills::FIERCE_BATTLE),
            linked("c", LinkSkills::empty()),
            linked("reserve", LinkSkills::PREPARED_FOR_BATTLE),
        ]);
        let links = t.apply_link_bonuses(0).unwrap();
        assert_eq!(links, LinkSkills::FIERCE_BATTLE);

        let a = t.member(0).unwrap();
        assert_eq!(a.buffs.link_atk_pct, 20);
        assert_eq!(a.buffs.link_energy, 0);
        assert_eq!(a.attack(), 1_200);
    }

    #[test]
    fn reapplying_does_not_accumulate() {
        let mut t = team(vec![
            linked("a", LinkSkills::BIG_BAD_BOSSES),
            linked("b", LinkSkills::BIG_BAD_BOSSES),
        ]);
        t.apply_link_bonuses(0).unwrap();
        t.apply_link_bonuses(0).unwrap();
        assert_eq!(t.member(0).unwrap().buffs.link_atk_pct, 25);
    }
}
