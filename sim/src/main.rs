use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::time::{self, Instant, MissedTickBehavior};

use common::{
    level::{LevelPhaseKind, LevelState},
    protocol::SimSnapshot,
};
use sim::{
    build_app,
    config::SimConfig,
    resources::{PilotMode, SimStats, TickCounter},
    world::capture_snapshot,
};

const LOG_FILTER: &str = "common=info,sim=info";

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Miasma arena simulation", long_about = None)]
struct Args {
    // Ticks to simulate, 0 for no limit
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    // Length of one tick in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    // Seed for every random draw
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    // Who holds the direction keys
    #[arg(short, long, value_enum, default_value_t = PilotMode::Forage)]
    pilot: PilotMode,

    // Maximum missiles in flight
    #[arg(long, default_value_t = 64, conflicts_with = "unbounded_missiles")]
    missile_capacity: usize,

    // Never refuse a missile launch
    #[arg(long, default_value_t = false)]
    unbounded_missiles: bool,

    // Leave the stabilizer out of the arena
    #[arg(long, default_value_t = false)]
    no_stabilizer: bool,

    // Start over from cycle 1 instead of exiting when the player dies
    #[arg(long, default_value_t = false)]
    restart_on_death: bool,

    // Pace ticks against the wall clock instead of stepping as fast as possible
    #[arg(long, default_value_t = false)]
    realtime: bool,

    // Log a status line every N ticks, 0 to disable
    #[arg(long, default_value_t = 300)]
    report_every: u64,

    // Write the final state here
    #[arg(long)]
    snapshot: Option<PathBuf>,

    // Show per-missile and per-state-change logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> SimConfig {
        SimConfig {
            ticks: self.ticks,
            tick_ms: self.tick_ms,
            seed: self.seed,
            pilot: self.pilot,
            missile_capacity: (!self.unbounded_missiles).then_some(self.missile_capacity),
            stabilizer: !self.no_stabilizer,
            restart_on_death: self.restart_on_death,
            realtime: self.realtime,
            report_every: self.report_every,
            snapshot: self.snapshot.clone(),
        }
    }
}

// ============================================================================
// Snapshot Output
// ============================================================================

#[cfg(any(feature = "json", feature = "bincode"))]
fn save_snapshot(path: &Path, snapshot: &SimSnapshot) -> Result<()> {
    common::io::write_snapshot(path, snapshot)
}

#[cfg(not(any(feature = "json", feature = "bincode")))]
fn save_snapshot(_path: &Path, _snapshot: &SimSnapshot) -> Result<()> {
    anyhow::bail!("built without a snapshot encoding, enable the json or bincode feature")
}

// ============================================================================
// Main
// ============================================================================

fn finished(app: &App, config: &SimConfig) -> bool {
    let world = app.world();
    let ticks_done = config.ticks > 0 && world.resource::<TickCounter>().0 >= config.ticks;
    let game_over = !config.restart_on_death && world.resource::<LevelState>().kind() == LevelPhaseKind::GameOver;
    ticks_done || game_over
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config();
    config.validate()?;

    let mut app = build_app(&config);
    app.add_plugins(bevy::log::LogPlugin {
        level: if args.verbose {
            bevy::log::Level::DEBUG
        } else {
            bevy::log::Level::INFO
        },
        filter: LOG_FILTER.to_string(),
        ..default()
    });

    info!(
        "simulating {} ticks of {} ms, seed {}, pilot {:?}",
        config.ticks, config.tick_ms, config.seed, config.pilot
    );

    if config.realtime {
        // Run the app in a loop manually, one update per tick
        let tick_duration = config.tick_duration();
        let mut interval = time::interval(tick_duration);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !finished(&app, &config) {
            interval.tick().await;

            let update_start = Instant::now();
            app.update();
            let update_elapsed = update_start.elapsed();

            if update_elapsed > tick_duration {
                warn!(
                    "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                    app.world().resource::<TickCounter>().0,
                    update_elapsed.as_secs_f64() * 1000.0,
                    tick_duration.as_secs_f64() * 1000.0
                );
            }
        }
    } else {
        while !finished(&app, &config) {
            app.update();
        }
    }

    let stats = app.world().resource::<SimStats>().clone();
    info!("done: {stats:?}");

    if let Some(path) = &config.snapshot {
        match capture_snapshot(app.world_mut()) {
            Some(snapshot) => {
                save_snapshot(path, &snapshot)?;
                info!("snapshot written to {}", path.display());
            }
            None => warn!("no level to snapshot"),
        }
    }

    Ok(())
}
