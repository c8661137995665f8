use bevy::prelude::*;

use crate::resources::SimRng;
use common::{
    map::ArenaLayout,
    markers::{PlayerMarker, StabilizerMarker},
    protocol::Position,
    stabilizer::{Stabilizer, touches},
    vitals::PlayerVitals,
};

// ============================================================================
// Stabilizer Systems
// ============================================================================

pub fn stabilizer_wander_system(
    time: Res<Time>,
    layout: Res<ArenaLayout>,
    mut rng: ResMut<SimRng>,
    mut query: Query<(&mut Position, &mut Stabilizer), (With<StabilizerMarker>, Without<PlayerMarker>)>,
) {
    let delta = time.delta();
    for (mut pos, mut stabilizer) in &mut query {
        *pos = stabilizer.update(*pos, delta, &layout.walls, &mut rng.0);
    }
}

// Contact cancels infected jitter for this tick's movement
pub fn stabilizer_contact_system(
    stabilizers: Query<&Position, (With<StabilizerMarker>, Without<PlayerMarker>)>,
    mut player: Query<(&Position, &mut PlayerVitals), With<PlayerMarker>>,
) {
    let Ok((player_pos, mut vitals)) = player.single_mut() else {
        return;
    };

    if stabilizers.iter().any(|stab_pos| touches(stab_pos, player_pos)) {
        vitals.stabilize();
    }
}
