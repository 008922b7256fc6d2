//! Read-only battle views handed to providers and front ends.

use super::events::BattleEvent;
use super::phase::Phase;
use crate::items::{Inventory, SupportItem};
use crate::state::{Attribute, Combatant, StatusEffect};
use crate::team::{DamageModel, EffectSlot, HpPool, Team, TimedEffect};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberView {
    pub name: String,
    pub attribute: Attribute,
    pub hp: u64,
    pub max_hp: u64,
    pub attack: u64,
    pub defense: u64,
    pub energy: u8,
    pub rotation_slot: Option<u8>,
    pub alive: bool,
    pub is_leader: bool,
    pub status: Vec<StatusEffect>,
    /// Display-only link partner count bonus.
    pub link_partner_bonus: u32,
}

impl MemberView {
    fn capture(team: &Team, index: usize, member: &Combatant) -> Self {
        Self {
            name: member.name.clone(),
            attribute: member.attribute,
            hp: member.hp,
            max_hp: member.max_hp,
            attack: member.attack(),
            defense: member.defense(),
            energy: member.energy.value(),
            rotation_slot: member.rotation_slot,
            alive: member.is_alive(),
            is_leader: member.is_leader,
            status: member.status.iter().copied().collect(),
            link_partner_bonus: team.link_partner_bonus(index),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamView {
    pub model: DamageModel,
    pub pool: HpPool,
    pub hp_pct: u32,
    pub momentum: u8,
    pub active: Vec<usize>,
    pub reserve: Vec<usize>,
    pub effects: Vec<(EffectSlot, TimedEffect)>,
    pub link_edges: Vec<(usize, usize)>,
    pub members: Vec<MemberView>,
}

impl TeamView {
    pub fn capture(team: &Team) -> Self {
        Self {
            model: team.model(),
            pool: team.pool(),
            hp_pct: team.hp_pct(),
            momentum: team.momentum.value(),
            active: team.rotation().active().to_vec(),
            reserve: team.rotation().reserve().to_vec(),
            effects: team.effects().iter().collect(),
            link_edges: team.link_adjacency().edges().collect(),
            members: team
                .members()
                .iter()
                .enumerate()
                .map(|(i, m)| MemberView::capture(team, i, m))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub phase: Phase,
    pub player: TeamView,
    pub enemy: TeamView,
    pub inventory: Vec<(SupportItem, u8)>,
    pub field: Vec<Attribute>,
    pub enemy_delayed: bool,
    pub recent: Vec<BattleEvent>,
}

impl BattleSnapshot {
    pub(super) fn inventory_view(inventory: &Inventory) -> Vec<(SupportItem, u8)> {
        inventory.iter().collect()
    }
}
