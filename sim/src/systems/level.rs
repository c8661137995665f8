use bevy::prelude::*;

use crate::{
    config::SimConfig,
    events::{InfectionCleansed, LevelCompleted, LevelRestarted},
    resources::SimRng,
    world::{despawn_level, spawn_level},
};
use common::{
    items::FoodSpawner,
    level::{LevelPhaseKind, LevelState, in_safe_zone},
    map::ArenaLayout,
    markers::{LevelEntity, PlayerMarker},
    projectiles::ProjectilePool,
    protocol::Position,
    vitals::PlayerVitals,
};

// Run condition for everything that only happens mid-level
#[must_use]
pub fn level_is_playing(level: Res<LevelState>) -> bool {
    level.is_playing()
}

// ============================================================================
// Level Setup System
// ============================================================================

pub fn level_setup_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    layout: Res<ArenaLayout>,
    mut rng: ResMut<SimRng>,
) {
    spawn_level(&mut commands, &layout, config.stabilizer, &mut rng.0);
}

// ============================================================================
// Safe Zone System
// ============================================================================

pub fn safe_zone_system(
    layout: Res<ArenaLayout>,
    mut level: ResMut<LevelState>,
    mut player: Query<(&Position, &mut PlayerVitals), With<PlayerMarker>>,
    mut cleansed: MessageWriter<InfectionCleansed>,
    mut completed: MessageWriter<LevelCompleted>,
) {
    let Ok((pos, mut vitals)) = player.single_mut() else {
        return;
    };
    if vitals.is_dead() || !in_safe_zone(&layout.safe_zone, pos) {
        return;
    }

    let outcome = level.handle_safe_zone(&mut vitals);
    if outcome.cleansed {
        info!("infection cleansed");
        cleansed.write(InfectionCleansed);
    }
    if outcome.completed {
        completed.write(LevelCompleted { cycle: level.cycle() });
    }
}

// ============================================================================
// Level Transition System
// ============================================================================

// Rebuilds the level once the completion delay runs out, or straight after a
// death when configured to.
pub fn level_transition_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SimConfig>,
    layout: Res<ArenaLayout>,
    mut level: ResMut<LevelState>,
    mut pool: ResMut<ProjectilePool>,
    mut spawner: ResMut<FoodSpawner>,
    mut rng: ResMut<SimRng>,
    entities: Query<Entity, With<LevelEntity>>,
    mut restarted: MessageWriter<LevelRestarted>,
) {
    let restart = match level.kind() {
        LevelPhaseKind::Playing => false,
        LevelPhaseKind::Complete => level.tick(time.delta()),
        LevelPhaseKind::GameOver => config.restart_on_death,
    };
    if !restart {
        return;
    }

    level.restart();
    despawn_level(&mut commands, &entities);
    pool.clear();
    spawner.reset();
    spawn_level(&mut commands, &layout, config.stabilizer, &mut rng.0);

    info!("starting cycle {}", level.cycle());
    restarted.write(LevelRestarted { cycle: level.cycle() });
}
