use bevy::prelude::*;
use rand::Rng;

use crate::resources::TickCounter;
use common::{
    level::LevelState,
    map::ArenaLayout,
    markers::{FoodMarker, LevelEntity, PlayerMarker, SentinelMarker, StabilizerMarker},
    players::PlayerInput,
    projectiles::ProjectilePool,
    protocol::{PlayerSnapshot, Position, SentinelId, SentinelSnapshot, SimSnapshot},
    sentinel::Sentinel,
    stabilizer::Stabilizer,
    vitals::{Infectable, PlayerVitals},
};

// ============================================================================
// Level Construction
// ============================================================================

// Spawns everything a fresh level needs. Food arrives later from the spawner.
pub fn spawn_level<R: Rng>(commands: &mut Commands, layout: &ArenaLayout, with_stabilizer: bool, rng: &mut R) {
    commands.spawn((
        PlayerMarker,
        LevelEntity,
        layout.player_spawn,
        PlayerVitals::default(),
        PlayerInput::IDLE,
    ));

    for (index, spawn) in layout.sentinel_spawns.iter().enumerate() {
        let id = SentinelId(index as u32);
        commands.spawn((SentinelMarker, LevelEntity, id, Sentinel::new(id, *spawn)));
    }

    if with_stabilizer && let Some(spawn) = layout.stabilizer_spawn {
        commands.spawn((StabilizerMarker, LevelEntity, spawn, Stabilizer::new(spawn, rng)));
    }

    debug!(
        "spawned level: {} sentinels, stabilizer {}",
        layout.sentinel_spawns.len(),
        if with_stabilizer { "on" } else { "off" }
    );
}

pub fn despawn_level(commands: &mut Commands, entities: &Query<Entity, With<LevelEntity>>) {
    for entity in entities {
        commands.entity(entity).despawn();
    }
}

// ============================================================================
// Snapshots
// ============================================================================

// None until the level has been spawned
pub fn capture_snapshot(world: &mut World) -> Option<SimSnapshot> {
    let player = {
        let mut query = world.query_filtered::<(&Position, &PlayerVitals), With<PlayerMarker>>();
        let (pos, vitals) = query.single(world).ok()?;
        PlayerSnapshot {
            pos: *pos,
            mass_integrity: vitals.mass_integrity(),
            infected: vitals.is_infected(),
            stunned: vitals.is_stunned(),
            dead: vitals.is_dead(),
        }
    };

    let mut sentinels: Vec<SentinelSnapshot> = world.query::<&Sentinel>().iter(world).map(Sentinel::snapshot).collect();
    sentinels.sort_by_key(|s| s.id.0);
    let food = world.query_filtered::<(), With<FoodMarker>>().iter(world).count() as u32;

    let level = world.resource::<LevelState>();
    Some(SimSnapshot {
        tick: world.resource::<TickCounter>().0,
        cycle: level.cycle(),
        phase: level.kind(),
        player,
        sentinels,
        missiles: world.resource::<ProjectilePool>().snapshot(),
        food,
    })
}

// Positions are components on everything except sentinels, which carry their own
pub fn nearest<'a>(from: Position, candidates: impl Iterator<Item = &'a Position>) -> Option<Position> {
    candidates
        .copied()
        .min_by(|a, b| from.distance(*a).total_cmp(&from.distance(*b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_the_closest_candidate() {
        let from = Position::new(0.0, 0.0);
        let candidates = [Position::new(10.0, 0.0), Position::new(3.0, 4.0), Position::new(-8.0, 0.0)];
        assert_eq!(nearest(from, candidates.iter()), Some(Position::new(3.0, 4.0)));
        assert_eq!(nearest(from, std::iter::empty()), None);
    }
}
