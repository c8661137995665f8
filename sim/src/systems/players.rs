use bevy::prelude::*;

use crate::{
    events::PlayerDied,
    resources::{Pilot, PilotMode, SimRng},
    world::nearest,
};
use common::{
    level::LevelState,
    map::ArenaLayout,
    markers::{FoodMarker, PlayerMarker},
    players::{PlayerInput, plan_player_move},
    protocol::Position,
    sentinel::Sentinel,
    vitals::{Infectable, PlayerVitals},
};

// Close enough to a waypoint to let go of that axis
const PILOT_DEADZONE: f32 = 4.0;

// ============================================================================
// Pilot Input System
// ============================================================================

// Decides which direction keys are held this tick.
pub fn pilot_input_system(
    pilot: Res<Pilot>,
    layout: Res<ArenaLayout>,
    sentinels: Query<&Sentinel>,
    food: Query<&Position, (With<FoodMarker>, Without<PlayerMarker>)>,
    mut player: Query<(&Position, &PlayerVitals, &mut PlayerInput), With<PlayerMarker>>,
) {
    let Ok((pos, vitals, mut input)) = player.single_mut() else {
        return;
    };

    let waypoint = match pilot.mode {
        PilotMode::Idle => None,
        PilotMode::Charge => nearest(*pos, sentinels.iter().map(|s| &s.position)),
        PilotMode::Forage => {
            if vitals.is_infected() || vitals.mass_integrity() >= 1.0 {
                Some(layout.safe_zone.center())
            } else {
                nearest(*pos, food.iter())
            }
        }
    };

    let next = waypoint.map_or(PlayerInput::IDLE, |to| PlayerInput::toward(*pos, to, PILOT_DEADZONE));
    if *input != next {
        *input = next;
    }
}

// ============================================================================
// Player Movement System
// ============================================================================

pub fn players_movement_system(
    time: Res<Time>,
    layout: Res<ArenaLayout>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(&mut Position, &mut PlayerVitals, &PlayerInput), With<PlayerMarker>>,
) {
    let delta = time.delta_secs();

    for (mut pos, mut vitals, input) in &mut query {
        // Jitter is drawn every tick so the stabilizer only ever suppresses one
        let jitter = vitals.consume_jitter(&mut rng.0);
        let target = plan_player_move(&pos, *input, &vitals, jitter, &layout.walls, delta);
        if target != *pos {
            *pos = target;
        }
    }
}

// ============================================================================
// Player Timer System
// ============================================================================

pub fn players_timer_system(time: Res<Time>, mut query: Query<&mut PlayerVitals, With<PlayerMarker>>) {
    let delta = time.delta();
    for mut vitals in &mut query {
        vitals.tick(delta);
    }
}

// ============================================================================
// Death Watch System
// ============================================================================

pub fn players_death_watch_system(
    mut level: ResMut<LevelState>,
    query: Query<(&Position, &PlayerVitals), With<PlayerMarker>>,
    mut died: MessageWriter<PlayerDied>,
) {
    for (pos, vitals) in &query {
        if vitals.is_dead() && level.game_over() {
            warn!(
                "player died at ({:.0}, {:.0}) in cycle {}",
                pos.x,
                pos.y,
                level.cycle()
            );
            died.write(PlayerDied { position: *pos });
        }
    }
}
