use bevy::prelude::*;
use clap::ValueEnum;
use rand::{SeedableRng, rngs::StdRng};

// ============================================================================
// Bevy Resources
// ============================================================================

// Every random draw in the simulation comes from here, so a seed replays a run exactly.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// Stand-in for the keyboard: decides which keys are held each tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PilotMode {
    // Hands off the keys
    Idle,
    // Walk straight at the nearest sentinel
    Charge,
    // Eat when hurt, head for the safe zone when infected or healthy
    #[default]
    Forage,
}

#[derive(Resource, Debug, Default)]
pub struct Pilot {
    pub mode: PilotMode,
}

// Running totals for the status line and the end of run summary
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SimStats {
    pub missiles_fired: u32,
    pub hits_taken: u32,
    pub wall_impacts: u32,
    pub infections: u32,
    pub cleanses: u32,
    pub food_eaten: u32,
    pub notes_played: u32,
    pub deaths: u32,
    pub levels_completed: u32,
}

#[derive(Resource, Debug, Default)]
pub struct TickCounter(pub u64);
