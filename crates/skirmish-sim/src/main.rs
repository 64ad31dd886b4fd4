//! Skirmish headless runner.
//!
//! Usage: `skirmish [config.toml]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use skirmish_sim::{Arena, SimConfig, CONFIG_FILE};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("skirmish=info".parse()?)
                .add_directive("skirmish_sim=info".parse()?)
                .add_directive("skirmish_ai=info".parse()?),
        )
        .init();

    info!("Skirmish starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = SimConfig::load_from(&config_path);
    info!(
        "{} enemies, {} ms at {} ms ticks (seed {})",
        config.enemy_count, config.duration_ms, config.tick_ms, config.seed
    );

    let started = Instant::now();
    let mut arena = Arena::new(config);
    let report = arena.run();
    let metrics = arena.ai().get_performance_metrics();

    info!(
        "Ran {} ticks ({} ms simulated) in {:.1} ms",
        report.ticks,
        report.elapsed_ms,
        started.elapsed().as_secs_f64() * 1000.0
    );
    info!(
        "Player took {} hits ({:.1} damage), landed {} strikes, {} enemies killed",
        report.hits_taken, report.damage_taken, report.strikes_landed, report.enemies_killed
    );
    info!(
        "AI: {} active, {} clamp checks, last tick {:.3} ms",
        metrics.active_enemies, metrics.collision_checks, metrics.last_update_ms
    );
    if report.trace_events > 0 {
        info!("{} AI trace events", report.trace_events);
    }
    if report.player_down {
        info!("Player was defeated");
    }

    info!("Skirmish shutdown complete");
    Ok(())
}
