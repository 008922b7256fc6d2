use arrayvec::ArrayVec;

use super::events::{BattleEvent, EventLog};
use super::phase::{BattleOutcome, Phase};
use super::request::{MoveContext, MoveProvider, RequestKind};
use super::snapshot::{BattleSnapshot, TeamView};
use crate::config::BattleConfig;
use crate::energy::{EnergyField, select_tier, unlocked_tiers};
use crate::env::Dice;
use crate::error::{ErrorContext, InvariantError};
use crate::items::Inventory;
use crate::kit::check_active;
use crate::state::{MemberRef, Side};
use crate::team::Team;

/// Owns a battle from the first round to its outcome.
///
/// Both teams are moved in at construction; nothing outside the engine
/// mutates them afterwards.
#[derive(Debug)]
pub struct BattleEngine {
    pub(super) player: Team,
    pub(super) enemy: Team,
    pub(super) inventory: Inventory,
    pub(super) field: EnergyField,
    pub(super) dice: Dice,
    pub(super) config: BattleConfig,
    pub(super) log: EventLog,
    pub(super) enemy_delayed: bool,
    pub(super) delay_used: bool,
    round: u32,
    phase: Phase,
    turn_order: ArrayVec<usize, { BattleConfig::ROTATION_SIZE }>,
}

impl BattleEngine {
    /// Validates both sides, applies leader skills that have not run yet and
    /// sets up rotations, the inventory and the energy field.
    pub fn new(
        mut player: Team,
        mut enemy: Team,
        config: BattleConfig,
        mut dice: Dice,
    ) -> Result<Self, InvariantError> {
        for (side, team) in [(Side::Player, &mut player), (Side::Enemy, &mut enemy)] {
            if team.is_empty() {
                return Err(InvariantError::EmptyTeam { side });
            }
            if !team.bonuses_applied() {
                team.apply_leader_bonus()?;
            }
            team.setup_rotation();
        }

        let field = EnergyField::filled(config.field_capacity, &mut dice, config.rainbow_chance_pct);
        tracing::info!(
            seed = dice.seed(),
            player = player.len(),
            enemy = enemy.len(),
            pool = player.pool().total,
            "battle initialised"
        );

        Ok(Self {
            inventory: Inventory::uniform(config.starting_items),
            player,
            enemy,
            field,
            dice,
            config,
            log: EventLog::new(),
            enemy_delayed: false,
            delay_used: false,
            round: 0,
            phase: Phase::RoundStart,
            turn_order: ArrayVec::new(),
        })
    }

    /// Replaces the default inventory.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Team {
        &self.player
    }

    pub fn enemy(&self) -> &Team {
        &self.enemy
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn field(&self) -> &EnergyField {
        &self.field
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    pub fn enemy_delayed(&self) -> bool {
        self.enemy_delayed
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    /// Runs the current phase and advances to the next one.
    ///
    /// Calling `step` on an ended battle is a no-op.
    pub fn step(&mut self, provider: &mut dyn MoveProvider) -> Result<Phase, InvariantError> {
        let next = match self.phase {
            Phase::Ended(outcome) => return Ok(Phase::Ended(outcome)),
            Phase::RoundStart => self.start_round()?,
            Phase::TeamUpkeep => self.team_upkeep()?,
            Phase::MemberTurn(slot) => self.member_turn(slot, provider)?,
            Phase::EnemyPhase => self.enemy_phase()?,
            Phase::Rotate => self.rotate()?,
        };

        self.phase = next;
        if let Phase::Ended(outcome) = next {
            tracing::info!(round = self.round, %outcome, "battle ended");
            self.log.push(BattleEvent::BattleEnded { outcome });
        }
        self.publish(provider);
        Ok(next)
    }

    /// Steps until the battle ends.
    pub fn run(&mut self, provider: &mut dyn MoveProvider) -> Result<BattleOutcome, InvariantError> {
        loop {
            if let Phase::Ended(outcome) = self.step(provider)? {
                return Ok(outcome);
            }
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            phase: self.phase,
            player: TeamView::capture(&self.player),
            enemy: TeamView::capture(&self.enemy),
            inventory: BattleSnapshot::inventory_view(&self.inventory),
            field: self.field.spheres().map(|s| s.0).collect(),
            enemy_delayed: self.enemy_delayed,
            recent: self.log.recent(self.config.event_window).to_vec(),
        }
    }

    pub(super) fn publish(&self, provider: &mut dyn MoveProvider) {
        provider.on_snapshot(&self.snapshot());
    }

    pub(super) fn error_context(&self, index: usize) -> ErrorContext {
        ErrorContext::new(self.round).with_actor(MemberRef::player(index))
    }

    /// Builds the request context for player member `index`.
    pub(super) fn move_context(
        &self,
        kind: RequestKind,
        index: usize,
        attempt: u32,
    ) -> Result<MoveContext<'_>, InvariantError> {
        let actor = self.player.member(index)?;
        let side_hp_pct = self.player.hp_pct();
        Ok(MoveContext {
            kind,
            round: self.round,
            member: index,
            actor,
            legal_targets: self.enemy.living().collect(),
            unlocked: unlocked_tiers(actor, &self.player.momentum),
            attack_tier: select_tier(actor, &self.player.momentum),
            active_skill: check_active(actor, side_hp_pct).map(|_| ()),
            inventory: &self.inventory,
            momentum: self.player.momentum.value(),
            side_hp_pct,
            field: &self.field,
            attempt,
        })
    }

    fn start_round(&mut self) -> Result<Phase, InvariantError> {
        if self.round >= self.config.max_rounds {
            return Err(InvariantError::RoundLimitExceeded {
                limit: self.config.max_rounds,
            });
        }
        self.round += 1;
        self.enemy_delayed = false;
        tracing::debug!(round = self.round, pool = self.player.pool().total, "round start");
        self.log.push(BattleEvent::RoundStarted { round: self.round });

        for slot in self.player.effects_mut().tick() {
            self.log.push(BattleEvent::TeamEffectExpired { slot });
        }
        Ok(Phase::TeamUpkeep)
    }

    fn team_upkeep(&mut self) -> Result<Phase, InvariantError> {
        self.player
            .validate_rotation()
            .map_err(|e| e.with_context(ErrorContext::new(self.round).with_message("upkeep")))?;
        self.turn_order = self.player.rotation().active().iter().copied().collect();
        Ok(self.member_phase(0))
    }

    fn member_phase(&self, slot: usize) -> Phase {
        if slot < self.turn_order.len() {
            Phase::MemberTurn(slot)
        } else {
            Phase::EnemyPhase
        }
    }

    fn member_turn(
        &mut self,
        slot: usize,
        provider: &mut dyn MoveProvider,
    ) -> Result<Phase, InvariantError> {
        if let Some(outcome) = self.decided() {
            return Ok(Phase::Ended(outcome));
        }
        let Some(&index) = self.turn_order.get(slot) else {
            return Ok(Phase::EnemyPhase);
        };
        if self.player.member(index)?.is_alive() {
            self.run_member_turn(index, provider)?;
        }
        Ok(match self.decided() {
            Some(outcome) => Phase::Ended(outcome),
            None => self.member_phase(slot + 1),
        })
    }

    fn enemy_phase(&mut self) -> Result<Phase, InvariantError> {
        if self.enemy_delayed {
            tracing::debug!(round = self.round, "enemy phase delayed");
            self.log.push(BattleEvent::EnemyPhaseSkipped);
        } else {
            self.run_enemy_phase()?;
        }
        Ok(match self.decided() {
            Some(outcome) => Phase::Ended(outcome),
            None => Phase::Rotate,
        })
    }

    fn rotate(&mut self) -> Result<Phase, InvariantError> {
        let rotated = self
            .player
            .rotate()
            .map_err(|e| e.with_context(ErrorContext::new(self.round).with_message("rotate")))?;
        if rotated {
            self.log.push(BattleEvent::Rotated {
                active: self.player.rotation().active().to_vec(),
            });
        }
        Ok(Phase::RoundStart)
    }

    /// Defeat is checked first: a side at zero pooled HP has lost even if
    /// its counter finished the enemy in the same exchange.
    fn decided(&self) -> Option<BattleOutcome> {
        if self.player.is_defeated() {
            Some(BattleOutcome::Defeat)
        } else if self.enemy.is_defeated() {
            Some(BattleOutcome::Victory)
        } else {
            None
        }
    }
}
