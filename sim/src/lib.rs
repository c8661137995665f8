pub mod config;
pub mod events;
pub mod resources;
pub mod systems;
pub mod world;

use bevy::{prelude::*, time::TimeUpdateStrategy};

use config::SimConfig;
use events::*;
use resources::{Pilot, SimRng, SimStats, TickCounter};
use systems::*;
use common::{items::FoodSpawner, level::LevelState, map::ArenaLayout, projectiles::ProjectilePool};

// ============================================================================
// App Construction
// ============================================================================

// Everything but logging, which belongs to the binary so tests can build as many
// apps as they like.
#[must_use]
pub fn build_app(config: &SimConfig) -> App {
    let mut app = App::new();

    let layout = if config.stabilizer {
        ArenaLayout::inside()
    } else {
        ArenaLayout::inside().without_stabilizer()
    };

    app.add_plugins(MinimalPlugins)
        .insert_resource(config.clone())
        .insert_resource(layout)
        .insert_resource(SimRng::seeded(config.seed))
        .insert_resource(Pilot { mode: config.pilot })
        .insert_resource(ProjectilePool::with_capacity(config.missile_capacity))
        .insert_resource(FoodSpawner::default())
        .insert_resource(LevelState::default())
        .insert_resource(SimStats::default())
        .insert_resource(TickCounter::default())
        .add_message::<MissileFired>()
        .add_message::<MissileImpacted>()
        .add_message::<DamageTaken>()
        .add_message::<PlayerInfected>()
        .add_message::<InfectionCleansed>()
        .add_message::<PlayerDied>()
        .add_message::<ArpeggioNote>()
        .add_message::<FoodEaten>()
        .add_message::<LevelCompleted>()
        .add_message::<LevelRestarted>()
        .add_systems(Startup, level_setup_system)
        .add_systems(
            Update,
            (
                // Gameplay, in order: input, movement, sentinels, missiles, pickups, level rules.
                // Sentinels must spawn before the steering pass, and collisions must see this
                // tick's steered positions.
                (
                    pilot_input_system,
                    stabilizer_wander_system,
                    stabilizer_contact_system,
                    players_movement_system,
                    players_timer_system,
                    sentinels_update_system,
                    projectiles_movement_system,
                    projectiles_hit_system,
                    food_spawn_system,
                    food_collection_system,
                    safe_zone_system,
                    players_death_watch_system,
                )
                    .chain()
                    .run_if(level_is_playing),
                level_transition_system,
                (stats_system, status_report_system, tick_counter_system).chain(),
            )
                .chain(),
        );

    if !config.realtime {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(config.tick_duration()));
    }

    app
}
