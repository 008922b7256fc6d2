//! Enemy phase and player counters.

use super::events::{BattleEvent, StrikeReport};
use super::sequencer::BattleEngine;
use crate::combat::{AttackKind, StrikeOutcome, land, plan_attack, resolve_strike};
use crate::config::BattleConfig;
use crate::env::RollContext;
use crate::error::InvariantError;
use crate::state::{MemberRef, StatusKind};

impl BattleEngine {
    pub(super) fn run_enemy_phase(&mut self) -> Result<(), InvariantError> {
        let living: Vec<usize> = self.enemy.living().collect();
        for &index in &living {
            let enemy = self.enemy.member_mut(index)?;
            enemy.reset_turn();
            for kind in enemy.status.tick() {
                self.log.push(BattleEvent::StatusExpired {
                    who: MemberRef::enemy(index),
                    kind,
                });
            }
        }

        let slots = self.enemy_slots(&living)?;
        tracing::debug!(round = self.round(), ?slots, "enemy phase");

        for (slot, index) in slots.into_iter().enumerate() {
            if self.player.is_defeated() {
                break;
            }
            if !self.enemy.member(index)?.is_alive() {
                continue;
            }
            if self.enemy.member_mut(index)?.status.consume(StatusKind::Stun) {
                self.log.push(BattleEvent::TurnSkipped {
                    who: MemberRef::enemy(index),
                });
                continue;
            }
            self.enemy_attack(slot, index)?;
        }
        Ok(())
    }

    /// Each living enemy repeated by its attack count (at most three),
    /// shuffled and cut to three slots.
    fn enemy_slots(&mut self, living: &[usize]) -> Result<Vec<usize>, InvariantError> {
        let mut slots = Vec::new();
        for &index in living {
            let attacks = usize::from(self.enemy.member(index)?.max_attacks_per_turn)
                .min(BattleConfig::MAX_ENEMY_SLOTS);
            slots.extend(std::iter::repeat_n(index, attacks));
        }
        self.dice.shuffle(&mut slots, RollContext::EnemyOrder);
        slots.truncate(BattleConfig::MAX_ENEMY_SLOTS);
        Ok(slots)
    }

    fn enemy_attack(&mut self, slot: usize, index: usize) -> Result<(), InvariantError> {
        let targets = self.player.active_living();
        if targets.is_empty() {
            return Ok(());
        }
        let is_super = self
            .dice
            .chance(self.config.enemy_super_pct(slot), RollContext::EnemySuper);
        let target = targets[self.dice.pick(targets.len(), RollContext::EnemyTarget)];
        let kind = if is_super {
            AttackKind::Super
        } else {
            AttackKind::Normal
        };

        let plan = plan_attack(self.enemy.member_mut(index)?, kind, 0);
        let outcome = resolve_strike(
            self.enemy.member(index)?,
            self.player.member(target)?,
            &plan,
            &mut self.dice,
            self.config.critical_pct,
        );
        let report = match outcome {
            StrikeOutcome::Evaded => StrikeReport::Evaded,
            StrikeOutcome::Hit(hit) => {
                let landed = land(&mut self.player, target, &hit)?;
                StrikeReport::Landed {
                    damage: landed.damage,
                    critical: hit.critical,
                    matchup: hit.matchup,
                    stunned: landed.stunned,
                }
            }
        };
        tracing::debug!(enemy = index, target, %kind, ?report, pool = self.player.pool().total, "enemy strike");
        self.log.push(BattleEvent::Strike {
            attacker: MemberRef::enemy(index),
            target: MemberRef::player(target),
            kind,
            report,
        });

        if matches!(report, StrikeReport::Landed { .. }) {
            self.counter(target, index)?;
        }
        Ok(())
    }

    /// Player member `index` answers a landed hit from enemy `enemy`.
    fn counter(&mut self, index: usize, enemy: usize) -> Result<(), InvariantError> {
        if self.player.is_defeated() || !self.enemy.member(enemy)?.is_alive() {
            return Ok(());
        }
        let chance = self.player.member(index)?.kit.counter_pct;
        if chance == 0 || !self.dice.chance(chance, RollContext::Counter) {
            return Ok(());
        }
        let plan = plan_attack(self.player.member_mut(index)?, AttackKind::Counter, 0);
        self.strike_enemy(index, enemy, plan)
    }
}
