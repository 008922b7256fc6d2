//! Rule-based player for unattended battles.

use battle_core::engine::{BattleSnapshot, MoveContext, RequestKind};
use battle_core::energy::PathSpec;
use battle_core::{Attribute, BattleConfig, MoveChoice, MoveProvider, SupportItem};

/// Picks matching spheres, heals when the pool runs low, fires active
/// skills as soon as they unlock and otherwise attacks.
#[derive(Clone, Debug)]
pub struct Autopilot {
    max_path_len: usize,
    dokkan_quality: f64,
    item_used_this_turn: bool,
    last_round: u32,
}

impl Autopilot {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            max_path_len: config.max_path_len,
            dokkan_quality: 1.0,
            item_used_this_turn: false,
            last_round: 0,
        }
    }

    #[must_use]
    pub fn with_dokkan_quality(mut self, quality: f64) -> Self {
        self.dokkan_quality = quality;
        self
    }

    /// Matching spheres first, then rainbow, then the rest in field order.
    fn harvest_path(&self, ctx: &MoveContext<'_>) -> PathSpec {
        let own = ctx.actor.attribute;
        let rank = |attribute: Attribute| {
            if attribute == own {
                0
            } else if attribute == Attribute::Rainbow {
                1
            } else {
                2
            }
        };
        let mut indices: Vec<(u8, usize)> = ctx
            .field
            .spheres()
            .enumerate()
            .map(|(i, sphere)| (rank(sphere.0), i))
            .collect();
        indices.sort_unstable();
        PathSpec::Indices(
            indices
                .into_iter()
                .take(self.max_path_len)
                .map(|(_, i)| i)
                .collect(),
        )
    }

    /// One item per turn at most, strongest heal first.
    fn pick_item(&self, ctx: &MoveContext<'_>) -> Option<SupportItem> {
        if self.item_used_this_turn {
            return None;
        }
        let available = |item| ctx.inventory.count(item) > 0;
        let hp = ctx.side_hp_pct;
        [
            (SupportItem::Android8, 45),
            (SupportItem::PrincessSnake, 60),
            (SupportItem::Whis, 80),
            (SupportItem::GhostUsher, 30),
        ]
        .into_iter()
        .find(|&(item, below)| hp < below && available(item))
        .map(|(item, _)| item)
    }

    fn action(&mut self, ctx: &MoveContext<'_>) -> MoveChoice {
        if ctx.attempt == 0 {
            self.item_used_this_turn = false;
        }
        if let Some(item) = self.pick_item(ctx) {
            self.item_used_this_turn = true;
            return MoveChoice::UseItem { item };
        }
        let target = ctx.legal_targets.first().copied();
        if ctx.active_skill.is_ok() {
            return MoveChoice::UseActiveSkill { target };
        }
        MoveChoice::Attack {
            target: target.unwrap_or(0),
        }
    }
}

impl MoveProvider for Autopilot {
    fn request_move(&mut self, ctx: &MoveContext<'_>) -> MoveChoice {
        match ctx.kind {
            RequestKind::Harvest => MoveChoice::HarvestPath {
                path: self.harvest_path(ctx),
            },
            RequestKind::Action => self.action(ctx),
            RequestKind::DokkanPlay => MoveChoice::DokkanPlay {
                quality: self.dokkan_quality,
            },
        }
    }

    fn on_snapshot(&mut self, snapshot: &BattleSnapshot) {
        if snapshot.round != self.last_round {
            self.last_round = snapshot.round;
            tracing::debug!(
                round = snapshot.round,
                pool = snapshot.player.pool.total,
                enemy_hp_pct = snapshot.enemy.hp_pct,
                "round snapshot"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use battle_core::{
        BattleEngine, BattleEvent, Combatant, Dice, FixedRng, InvariantError, Inventory, Team,
    };

    use super::*;

    fn engine(player_hp: u64) -> BattleEngine {
        let player = Team::pooled()
            .with_member(Combatant::new("a", Attribute::Str, player_hp, 10, 1))
            .and_then(|t| t.with_member(Combatant::new("b", Attribute::Agl, 1_000, 10, 1)))
            .and_then(|t| t.with_member(Combatant::new("c", Attribute::Teq, 1_000, 10, 1)))
            .unwrap();
        let enemy = Team::per_member()
            .with_member(Combatant::new("boss", Attribute::Phy, 1_000_000, 1_400, 1))
            .unwrap();
        BattleEngine::new(
            player,
            enemy,
            BattleConfig::default().with_max_rounds(3),
            Dice::new(Arc::new(FixedRng(99)), 0),
        )
        .unwrap()
    }

    #[test]
    fn harvests_without_fallbacks() {
        let mut engine = engine(1_000);
        let mut pilot = Autopilot::new(engine.config());
        assert_eq!(
            engine.run(&mut pilot),
            Err(InvariantError::RoundLimitExceeded { limit: 3 })
        );
        assert!(
            !engine
                .events()
                .all()
                .iter()
                .any(|e| matches!(e, BattleEvent::Fallback { .. }))
        );
    }

    #[test]
    fn heals_once_the_pool_runs_low() {
        let mut engine = engine(1_000).with_inventory(Inventory::empty().with(SupportItem::Android8, 1));
        let mut pilot = Autopilot::new(engine.config());
        assert_eq!(
            engine.run(&mut pilot),
            Err(InvariantError::RoundLimitExceeded { limit: 3 })
        );

        // Two 1075 hits leave 850 of 3000 (28%); Android #8 restores 2100
        // and its guard cuts the third hit to 806.
        assert!(engine.events().all().contains(&BattleEvent::ItemUsed {
            item: SupportItem::Android8,
            healed: 2_100,
            applied: true,
        }));
        assert_eq!(engine.inventory().count(SupportItem::Android8), 0);
        assert_eq!(engine.player().pool().total, 2_144);
    }
}
