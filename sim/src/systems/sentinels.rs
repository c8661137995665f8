use bevy::prelude::*;

use crate::events::{ArpeggioNote, MissileFired, PlayerInfected};
use common::{
    markers::PlayerMarker, projectiles::ProjectilePool, protocol::Position, sentinel::Sentinel,
    vitals::PlayerVitals,
};

// ============================================================================
// Sentinel Update System
// ============================================================================

// Sentinels run before the missile pass, so a missile fired this tick steers this tick too.
pub fn sentinels_update_system(
    time: Res<Time>,
    mut pool: ResMut<ProjectilePool>,
    mut sentinels: Query<&mut Sentinel>,
    mut player: Query<(&Position, &mut PlayerVitals), With<PlayerMarker>>,
    mut fired: MessageWriter<MissileFired>,
    mut notes: MessageWriter<ArpeggioNote>,
    mut infected: MessageWriter<PlayerInfected>,
) {
    let Ok((player_pos, mut vitals)) = player.single_mut() else {
        return;
    };
    let delta = time.delta();

    for mut sentinel in &mut sentinels {
        let tick = sentinel.update(delta, *player_pos, &mut *vitals, &mut pool);

        if let Some(note) = tick.note {
            notes.write(ArpeggioNote {
                sentinel: sentinel.id,
                frequency: note.frequency,
                gain: note.gain,
            });
        }

        if tick.infected_target {
            info!("{:?} infected the player", sentinel.id);
            infected.write(PlayerInfected { sentinel: sentinel.id });
        }

        if let Some(missile) = tick.fired {
            debug!("{:?} fired {missile:?} ({:?})", sentinel.id, tick.state);
            fired.write(MissileFired {
                sentinel: sentinel.id,
                missile,
                origin: sentinel.position,
            });
        }
    }
}
