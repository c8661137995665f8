use bevy::prelude::*;

use crate::{
    config::SimConfig,
    events::*,
    resources::{SimStats, TickCounter},
};
use common::{
    level::LevelState,
    markers::PlayerMarker,
    projectiles::{ImpactKind, ProjectilePool},
    sentinel::Sentinel,
    vitals::PlayerVitals,
};

// ============================================================================
// Stats System
// ============================================================================

// Folds this tick's messages into the running totals.
pub fn stats_system(
    mut stats: ResMut<SimStats>,
    mut fired: MessageReader<MissileFired>,
    mut impacted: MessageReader<MissileImpacted>,
    mut damaged: MessageReader<DamageTaken>,
    mut infected: MessageReader<PlayerInfected>,
    mut cleansed: MessageReader<InfectionCleansed>,
    mut died: MessageReader<PlayerDied>,
    mut notes: MessageReader<ArpeggioNote>,
    mut eaten: MessageReader<FoodEaten>,
    mut completed: MessageReader<LevelCompleted>,
    mut restarted: MessageReader<LevelRestarted>,
) {
    stats.missiles_fired += fired.read().count() as u32;
    stats.hits_taken += damaged.read().count() as u32;
    stats.wall_impacts += impacted.read().filter(|m| m.kind == ImpactKind::Wall).count() as u32;
    stats.infections += infected.read().count() as u32;
    stats.cleanses += cleansed.read().count() as u32;
    stats.deaths += died.read().count() as u32;
    stats.notes_played += notes.read().count() as u32;
    stats.food_eaten += eaten.read().count() as u32;

    for LevelCompleted { cycle } in completed.read() {
        info!("cycle {cycle} complete");
        stats.levels_completed += 1;
    }
    for LevelRestarted { cycle } in restarted.read() {
        debug!("level rebuilt for cycle {cycle}");
    }
}

// ============================================================================
// Status Report System
// ============================================================================

pub fn status_report_system(
    config: Res<SimConfig>,
    counter: Res<TickCounter>,
    level: Res<LevelState>,
    stats: Res<SimStats>,
    pool: Res<ProjectilePool>,
    sentinels: Query<&Sentinel>,
    player: Query<&PlayerVitals, With<PlayerMarker>>,
) {
    if config.report_every == 0 || counter.0 == 0 || counter.0 % config.report_every != 0 {
        return;
    }

    let integrity = player.single().map_or(0.0, PlayerVitals::mass_integrity);
    let awareness = sentinels.iter().map(Sentinel::awareness).fold(0.0_f32, f32::max);
    info!(
        "tick {} cycle {} {:?}: integrity {:.2}, peak awareness {:.2}, {} missiles in flight, {} fired, {} hits",
        counter.0,
        level.cycle(),
        level.kind(),
        integrity,
        awareness,
        pool.active_count(),
        stats.missiles_fired,
        stats.hits_taken
    );
}

pub fn tick_counter_system(mut counter: ResMut<TickCounter>) {
    counter.0 += 1;
}
