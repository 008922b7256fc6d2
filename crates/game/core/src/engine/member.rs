//! Player member turns.

use super::events::{BattleEvent, FallbackReason, StrikeReport};
use super::request::{MoveChoice, MoveProvider, RequestKind};
use super::sequencer::BattleEngine;
use crate::combat::{
    AttackKind, AttackPlan, StrikeOutcome, land, plan_active_strike, plan_attack, resolve_strike,
};
use crate::config::BattleConfig;
use crate::energy::{AttackTier, HarvestRules, PathSpec, consume_tier, harvest, select_tier};
use crate::env::RollContext;
use crate::error::InvariantError;
use crate::items::{ItemEffect, SupportItem};
use crate::kit::{ActiveEffect, ActiveSkill, PassiveContext, apply_passive, check_active};
use crate::state::{MemberRef, StatusKind};
use crate::stats::scale_pct;
use crate::team::EffectSlot;

impl BattleEngine {
    /// One member's turn: upkeep, links, harvest, passive, then the action
    /// loop until a terminal move.
    pub(super) fn run_member_turn(
        &mut self,
        index: usize,
        provider: &mut dyn MoveProvider,
    ) -> Result<(), InvariantError> {
        let who = MemberRef::player(index);
        let member = self.player.member_mut(index)?;
        member.reset_turn();
        for kind in member.status.tick() {
            self.log.push(BattleEvent::StatusExpired { who, kind });
        }
        self.log.push(BattleEvent::TurnStarted { member: index });

        if self.player.member_mut(index)?.status.consume(StatusKind::Stun) {
            tracing::debug!(member = index, "stunned, turn skipped");
            self.log.push(BattleEvent::TurnSkipped { who });
            return Ok(());
        }

        let links = self.player.apply_link_bonuses(index)?;
        if !links.is_empty() {
            self.log.push(BattleEvent::LinksActivated {
                member: index,
                links,
            });
        }

        self.harvest_step(index, provider)?;
        self.passive_step(index)?;
        self.publish(provider);
        self.action_loop(index, provider)
    }

    fn harvest_step(
        &mut self,
        index: usize,
        provider: &mut dyn MoveProvider,
    ) -> Result<(), InvariantError> {
        let choice = {
            let ctx = self.move_context(RequestKind::Harvest, index, 0)?;
            provider.request_move(&ctx)
        };
        let path = match choice {
            MoveChoice::HarvestPath { path } => path,
            _ => {
                self.fallback(index, FallbackReason::UnexpectedChoice);
                PathSpec::Prefix(self.config.fallback_path_len)
            }
        };

        let rules = HarvestRules::from(&self.config);
        let (member, momentum) = self.player.member_with_momentum(index)?;
        let gain = harvest(&mut self.field, member, momentum, &path, &rules, &mut self.dice);
        let link_energy = member.buffs.link_energy;
        member.energy.add(link_energy);
        let energy = member.energy.value();
        let momentum = momentum.value();

        if gain.fell_back {
            self.fallback(index, FallbackReason::InvalidPath);
        }
        self.log.push(BattleEvent::Harvested {
            member: index,
            spheres: gain.spheres.len(),
            gain: gain.gain,
            link_energy,
            energy,
            momentum,
        });
        Ok(())
    }

    fn passive_step(&mut self, index: usize) -> Result<(), InvariantError> {
        let ctx = PassiveContext {
            side_hp_pct: self.player.hp_pct(),
            enemy_categories: self.enemy.living_categories(),
            enemies_present: !self.enemy.is_defeated(),
        };
        let member = self.player.member_mut(index)?;
        let energy = apply_passive(member, &ctx);
        let recovery = member
            .kit
            .recovery
            .filter(|r| member.counters.attacks_received >= r.min_hits_received)
            .map(|r| scale_pct(member.max_hp, u64::from(r.heal_pct)));
        self.log.push(BattleEvent::PassiveApplied {
            member: index,
            energy,
            attack: member.attack(),
            defense: member.defense(),
        });

        if let Some(amount) = recovery {
            let healed = self.player.recover(index, amount)?;
            if healed > 0 {
                self.log.push(BattleEvent::Recovered {
                    member: index,
                    amount: healed,
                });
            }
        }
        Ok(())
    }

    /// Items loop; attacks and active skills end the turn.
    fn action_loop(
        &mut self,
        index: usize,
        provider: &mut dyn MoveProvider,
    ) -> Result<(), InvariantError> {
        let mut attempt = 0;
        loop {
            if self.enemy.is_defeated() {
                return Ok(());
            }
            if attempt >= self.config.request_budget {
                tracing::warn!(member = index, attempt, "request budget exhausted");
                self.fallback(index, FallbackReason::RequestBudgetExhausted);
                return self.attack(index, None, provider);
            }

            let choice = {
                let ctx = self.move_context(RequestKind::Action, index, attempt)?;
                provider.request_move(&ctx)
            };
            attempt += 1;

            match choice {
                MoveChoice::Attack { target } => return self.attack(index, Some(target), provider),
                MoveChoice::UseItem { item } => {
                    self.use_item(item);
                    self.publish(provider);
                }
                MoveChoice::UseActiveSkill { target } => {
                    let verdict = check_active(self.player.member(index)?, self.player.hp_pct())
                        .copied();
                    match verdict {
                        Ok(skill) => return self.active_skill(index, skill, target, provider),
                        Err(reason) => {
                            self.log.push(BattleEvent::ActiveSkillRejected {
                                member: index,
                                reason,
                            });
                            self.publish(provider);
                        }
                    }
                }
                MoveChoice::HarvestPath { .. } | MoveChoice::DokkanPlay { .. } => {
                    self.fallback(index, FallbackReason::UnexpectedChoice);
                }
            }
        }
    }

    fn attack(
        &mut self,
        index: usize,
        requested: Option<usize>,
        provider: &mut dyn MoveProvider,
    ) -> Result<(), InvariantError> {
        let Some(target) = self.pick_target(index, requested) else {
            return Ok(());
        };

        let tier = select_tier(self.player.member(index)?, &self.player.momentum);
        let (kind, bonus_pct) = if tier == AttackTier::Bonus {
            self.bonus_mode(index, provider)?
        } else {
            let (member, momentum) = self.player.member_with_momentum(index)?;
            consume_tier(tier, member, momentum).map_err(|e| e.with_context(self.error_context(index)))?;
            (AttackKind::from(tier), 0)
        };

        let plan = plan_attack(self.player.member_mut(index)?, kind, bonus_pct);
        self.strike_enemy(index, target, plan)?;
        self.additional_attack(index, target)?;
        self.publish(provider);
        Ok(())
    }

    /// Requests the mini-game result and drains the momentum meter.
    ///
    /// A pass strikes as bonus mode scaled by quality, a miss as tier-1.
    fn bonus_mode(
        &mut self,
        index: usize,
        provider: &mut dyn MoveProvider,
    ) -> Result<(AttackKind, u32), InvariantError> {
        let choice = {
            let ctx = self.move_context(RequestKind::DokkanPlay, index, 0)?;
            provider.request_move(&ctx)
        };
        let quality = match choice {
            MoveChoice::DokkanPlay { quality } if quality.is_finite() => quality.clamp(0.0, 1.0),
            MoveChoice::DokkanPlay { .. } => {
                self.fallback(index, FallbackReason::InvalidQuality);
                0.0
            }
            _ => {
                self.fallback(index, FallbackReason::UnexpectedChoice);
                0.0
            }
        };

        let (member, momentum) = self.player.member_with_momentum(index)?;
        consume_tier(AttackTier::Bonus, member, momentum)?;

        let passed = quality >= self.config.dokkan_pass_quality;
        tracing::debug!(member = index, quality, passed, "bonus mode");
        self.log.push(BattleEvent::BonusMode {
            member: index,
            quality,
            passed,
        });
        if passed {
            let bonus = (quality * f64::from(self.config.dokkan_quality_bonus_pct)) as u32;
            Ok((AttackKind::Bonus, bonus))
        } else {
            Ok((AttackKind::Normal, 0))
        }
    }

    /// One extra tier-1 strike if the passive's chance comes up and the
    /// member's strike budget has room.
    fn additional_attack(&mut self, index: usize, target: usize) -> Result<(), InvariantError> {
        let member = self.player.member(index)?;
        let chance = member.buffs.additional_attack_pct;
        let has_budget = member.counters.attacks_this_turn < BattleConfig::MAX_STRIKES_PER_TURN;
        if chance == 0 || !has_budget || self.enemy.is_defeated() {
            return Ok(());
        }
        if !self.dice.chance(chance, RollContext::AdditionalAttack) {
            return Ok(());
        }
        let target = if self.enemy.member(target)?.is_alive() {
            target
        } else {
            match self.enemy.living().next() {
                Some(next) => next,
                None => return Ok(()),
            }
        };
        let plan = plan_attack(self.player.member_mut(index)?, AttackKind::Normal, 0);
        self.strike_enemy(index, target, plan)
    }

    fn active_skill(
        &mut self,
        index: usize,
        skill: ActiveSkill,
        target: Option<usize>,
        provider: &mut dyn MoveProvider,
    ) -> Result<(), InvariantError> {
        self.player.member_mut(index)?.active_skill_used = true;
        tracing::debug!(member = index, skill = skill.name, "active skill");
        self.log.push(BattleEvent::ActiveSkillUsed {
            member: index,
            name: skill.name.to_owned(),
        });

        match skill.effect {
            ActiveEffect::Strike {
                atk_pct,
                multiplier,
            } => {
                if let Some(target) = self.pick_target(index, target) {
                    let plan = plan_active_strike(self.player.member_mut(index)?, atk_pct, multiplier);
                    self.strike_enemy(index, target, plan)?;
                }
            }
            ActiveEffect::Domain { rounds } => {
                self.player.effects_mut().install(EffectSlot::Domain, 0, rounds);
            }
        }
        self.publish(provider);
        Ok(())
    }

    /// Applies every effect of `item`. Unavailable items are reported and
    /// leave the state unchanged.
    pub(super) fn use_item(&mut self, item: SupportItem) {
        if !self.inventory.take(item) {
            self.log.push(BattleEvent::ItemUnavailable { item });
            return;
        }

        let mut healed = 0;
        let mut applied = true;
        for effect in item.effects() {
            match *effect {
                ItemEffect::DelayEnemy => {
                    if self.delay_used {
                        applied = false;
                    } else {
                        self.delay_used = true;
                        self.enemy_delayed = true;
                    }
                }
                ItemEffect::Heal { pct } => healed += self.player.recover_pct(pct),
                ItemEffect::Install {
                    slot,
                    value,
                    rounds,
                } => self.player.effects_mut().install(slot, value, rounds),
            }
        }
        tracing::debug!(%item, healed, applied, "item used");
        self.log.push(BattleEvent::ItemUsed {
            item,
            healed,
            applied,
        });
    }

    /// `requested` if it names a living enemy, otherwise the first living
    /// enemy. A rejected request is reported as a fallback.
    fn pick_target(&mut self, index: usize, requested: Option<usize>) -> Option<usize> {
        let first = self.enemy.living().next();
        match requested {
            Some(target) if self.enemy.member(target).is_ok_and(|m| m.is_alive()) => Some(target),
            Some(_) if first.is_some() => {
                self.fallback(index, FallbackReason::InvalidTarget);
                first
            }
            _ => first,
        }
    }

    /// Resolves `plan` from player member `index` against enemy `target`.
    pub(super) fn strike_enemy(
        &mut self,
        index: usize,
        target: usize,
        plan: AttackPlan,
    ) -> Result<(), InvariantError> {
        let outcome = resolve_strike(
            self.player.member(index)?,
            self.enemy.member(target)?,
            &plan,
            &mut self.dice,
            self.config.critical_pct,
        );
        let counters = &mut self.player.member_mut(index)?.counters;
        counters.attacks_this_turn = counters.attacks_this_turn.saturating_add(1);

        let report = match outcome {
            StrikeOutcome::Evaded => StrikeReport::Evaded,
            StrikeOutcome::Hit(hit) => {
                let landed = land(&mut self.enemy, target, &hit)?;
                StrikeReport::Landed {
                    damage: landed.damage,
                    critical: hit.critical,
                    matchup: hit.matchup,
                    stunned: landed.stunned,
                }
            }
        };
        tracing::debug!(member = index, target, kind = %plan.kind, ?report, "player strike");
        self.log.push(BattleEvent::Strike {
            attacker: MemberRef::player(index),
            target: MemberRef::enemy(target),
            kind: plan.kind,
            report,
        });

        if matches!(report, StrikeReport::Landed { .. }) && !self.enemy.member(target)?.is_alive() {
            self.log.push(BattleEvent::Defeated {
                who: MemberRef::enemy(target),
            });
        }
        Ok(())
    }

    pub(super) fn fallback(&mut self, index: usize, reason: FallbackReason) {
        tracing::warn!(member = index, %reason, "move replaced by fallback");
        self.log.push(BattleEvent::Fallback {
            member: index,
            reason,
        });
    }
}
