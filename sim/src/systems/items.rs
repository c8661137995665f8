use bevy::prelude::*;

use crate::{events::FoodEaten, resources::SimRng};
use common::{
    items::{FoodSpawner, eat, touches_food},
    markers::{FoodMarker, LevelEntity, PlayerMarker},
    protocol::{FoodId, Position},
    vitals::PlayerVitals,
};

// ============================================================================
// Food Spawn System
// ============================================================================

pub fn food_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<FoodSpawner>,
    mut rng: ResMut<SimRng>,
    food: Query<(), With<FoodMarker>>,
) {
    let active = food.iter().count();
    if let Some((id, pos)) = spawner.tick(time.delta(), active, &mut rng.0) {
        debug!("{id:?} dropped at ({:.0}, {:.0})", pos.x, pos.y);
        commands.spawn((FoodMarker, LevelEntity, id, pos));
    }
}

// ============================================================================
// Food Collection System
// ============================================================================

// Food stays put while the player is at full integrity
pub fn food_collection_system(
    mut commands: Commands,
    food: Query<(Entity, &FoodId, &Position), (With<FoodMarker>, Without<PlayerMarker>)>,
    mut player: Query<(&Position, &mut PlayerVitals), With<PlayerMarker>>,
    mut eaten: MessageWriter<FoodEaten>,
) {
    let Ok((player_pos, mut vitals)) = player.single_mut() else {
        return;
    };

    for (entity, id, food_pos) in &food {
        if touches_food(player_pos, food_pos) && eat(&mut vitals) {
            debug!("player ate {id:?}, integrity {:.2}", vitals.mass_integrity());
            commands.entity(entity).despawn();
            eaten.write(FoodEaten {
                food: *id,
                mass_integrity: vitals.mass_integrity(),
            });
        }
    }
}
