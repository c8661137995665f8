use anyhow::{Result, ensure};
use bevy::prelude::*;
use std::{path::PathBuf, time::Duration};

use crate::resources::PilotMode;
use common::constants::MISSILE_POOL_CAPACITY;

// Bevy clamps virtual time deltas above this
const MAX_TICK_MS: u64 = 250;

// ============================================================================
// Simulation Configuration
// ============================================================================

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    // Number of ticks to run; 0 runs until the process is stopped
    pub ticks: u64,
    pub tick_ms: u64,
    pub seed: u64,
    pub pilot: PilotMode,
    // None means the pool never refuses a launch
    pub missile_capacity: Option<usize>,
    pub stabilizer: bool,
    pub restart_on_death: bool,
    pub realtime: bool,
    // Status line every N ticks; 0 disables it
    pub report_every: u64,
    pub snapshot: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            tick_ms: 16,
            seed: 0,
            pilot: PilotMode::Forage,
            missile_capacity: Some(MISSILE_POOL_CAPACITY),
            stabilizer: true,
            restart_on_death: false,
            realtime: false,
            report_every: 300,
            snapshot: None,
        }
    }
}

impl SimConfig {
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_TICK_MS).contains(&self.tick_ms),
            "tick length must be between 1 and {MAX_TICK_MS} ms, got {}",
            self.tick_ms
        );
        ensure!(self.missile_capacity != Some(0), "missile capacity must be at least 1");
        ensure!(
            self.ticks > 0 || !self.restart_on_death || self.realtime,
            "an endless fixed-step run needs --realtime"
        );
        if let Some(path) = &self.snapshot {
            ensure!(!path.as_os_str().is_empty(), "snapshot path is empty");
        }
        Ok(())
    }
}
