#![allow(dead_code)]

use std::sync::Arc;

use battle_core::engine::BattleEvent;
use battle_core::{
    Attribute, BattleConfig, BattleEngine, Combatant, Dice, FixedRng, InvariantError,
    MoveProvider, Team,
};

/// Every chance below 100% fails; jitter sits at its low end.
pub fn never() -> Dice {
    Dice::new(Arc::new(FixedRng(99)), 0)
}

/// Every non-zero chance passes; picks land on index 0.
pub fn always() -> Dice {
    Dice::new(Arc::new(FixedRng(0)), 0)
}

pub fn fighter(name: &str, hp: u64, attack: u64) -> Combatant {
    Combatant::new(name, Attribute::Str, hp, attack, 0)
}

pub fn player_team(size: usize, hp: u64, attack: u64) -> Team {
    let mut team = Team::pooled();
    for i in 0..size {
        team.add_member(fighter(&format!("p{i}"), hp, attack))
            .expect("team has room");
    }
    team
}

pub fn enemy_team(hp: u64, attack: u64, attacks: u8) -> Team {
    Team::per_member()
        .with_member(
            Combatant::new("boss", Attribute::Phy, hp, attack, 0).with_max_attacks(attacks),
        )
        .expect("team has room")
}

/// An enemy that neither dies nor hurts.
pub fn dummy_enemy() -> Team {
    enemy_team(u64::MAX / 4, 0, 1)
}

pub fn engine(player: Team, enemy: Team, max_rounds: u32, dice: Dice) -> BattleEngine {
    BattleEngine::new(player, enemy, BattleConfig::default().with_max_rounds(max_rounds), dice)
        .expect("valid teams")
}

/// Runs until the round limit stops the battle and returns the event log.
pub fn run_to_limit(engine: &mut BattleEngine, provider: &mut dyn MoveProvider) -> Vec<BattleEvent> {
    let err = engine.run(provider).expect_err("battle should hit the round limit");
    assert!(matches!(err, InvariantError::RoundLimitExceeded { .. }));
    engine.events().all().to_vec()
}

pub fn count(events: &[BattleEvent], pred: impl Fn(&BattleEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
