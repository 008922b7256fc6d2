//! Headless battle runner.
//!
//! ```text
//! SimConfig (environment)
//!   ├─→ ContentFactory (config.toml, roster.ron or stock content)
//!   ├─→ BattleEngine  (seeded dice)
//!   └─→ Autopilot     (MoveProvider)
//! ```

mod autopilot;
mod config;

pub use autopilot::Autopilot;
pub use config::SimConfig;

use anyhow::Context;
use battle_content::{ConfigLoader, ContentFactory};
use battle_core::{BattleEngine, BattleOutcome, Dice};

/// Finished battle, for reporting.
#[derive(Debug)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub engine: BattleEngine,
}

/// Loads content, builds the engine and plays the battle to its end.
pub fn run_battle(config: &SimConfig) -> anyhow::Result<BattleReport> {
    let factory = ContentFactory::new(&config.data_dir);
    let battle_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let roster = factory.load_roster()?;

    let mut autopilot = Autopilot::new(&battle_config).with_dokkan_quality(config.dokkan_quality);
    let mut engine = BattleEngine::new(
        roster.player,
        roster.enemy,
        battle_config,
        Dice::seeded(config.seed),
    )
    .context("Failed to set up battle")?;

    let outcome = engine.run(&mut autopilot).context("Battle aborted")?;
    Ok(BattleReport { outcome, engine })
}
