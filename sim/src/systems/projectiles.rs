use bevy::prelude::*;

use crate::events::{DamageTaken, MissileImpacted};
use common::{
    map::ArenaLayout,
    markers::PlayerMarker,
    projectiles::{ImpactKind, ProjectilePool},
    protocol::Position,
    vitals::PlayerVitals,
};

// ============================================================================
// Projectiles Movement System
// ============================================================================

// Sweep last tick's dead missiles, steer the rest at the player, expire old trails.
pub fn projectiles_movement_system(
    time: Res<Time>,
    mut pool: ResMut<ProjectilePool>,
    player: Query<&Position, With<PlayerMarker>>,
) {
    let Ok(target) = player.single() else {
        return;
    };

    let tick = pool.tick(time.delta(), *target);
    for id in &tick.culled {
        debug!("{id:?} left the arena");
    }
    if !tick.disposed_trails.is_empty() {
        trace!("disposed {} trails", tick.disposed_trails.len());
    }
}

// ============================================================================
// Projectiles Hit Detection System
// ============================================================================

pub fn projectiles_hit_system(
    layout: Res<ArenaLayout>,
    mut pool: ResMut<ProjectilePool>,
    mut player: Query<(&Position, &mut PlayerVitals), With<PlayerMarker>>,
    mut impacted: MessageWriter<MissileImpacted>,
    mut damaged: MessageWriter<DamageTaken>,
) {
    let Ok((player_pos, mut vitals)) = player.single_mut() else {
        return;
    };

    let impacts = pool.resolve_collisions(&layout.walls, *player_pos, &mut *vitals);
    for impact in impacts {
        if impact.kind == ImpactKind::Target {
            info!(
                "{:?} hit the player, integrity {:.2}{}",
                impact.missile,
                vitals.mass_integrity(),
                if impact.fatal { " (fatal)" } else { "" }
            );
            damaged.write(DamageTaken {
                missile: impact.missile,
                mass_integrity: vitals.mass_integrity(),
            });
        }
        impacted.write(MissileImpacted {
            missile: impact.missile,
            kind: impact.kind,
            position: impact.position,
        });
    }
}
