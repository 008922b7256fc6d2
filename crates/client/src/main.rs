//! Battle simulator binary.
//!
//! Plays one battle with the autopilot and prints the result.
//!
//! # Examples
//!
//! ```bash
//! BATTLE_SEED=7 RUST_LOG=battle_core=debug cargo run -p battle-client
//! ```

use anyhow::Result;
use battle_client::{SimConfig, run_battle};
use battle_core::engine::BattleEvent;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    setup_logging();

    tracing::info!(seed = config.seed, data_dir = %config.data_dir.display(), "starting battle");
    let report = run_battle(&config)?;

    let engine = &report.engine;
    let strikes = engine
        .events()
        .all()
        .iter()
        .filter(|e| matches!(e, BattleEvent::Strike { .. }))
        .count();
    println!("outcome: {}", report.outcome);
    println!("rounds:  {}", engine.round());
    println!("strikes: {strikes}");
    println!(
        "pool:    {}/{}",
        engine.player().pool().total,
        engine.player().pool().max
    );
    for member in engine.enemy().members() {
        println!("enemy {}: {}/{}", member.name, member.hp, member.max_hp);
    }
    if config.snapshot_json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
