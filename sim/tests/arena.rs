use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::{fixture, rstest};

use common::{
    level::{LevelPhaseKind, LevelState},
    markers::PlayerMarker,
    protocol::Position,
    sentinel::SentinelState,
};
use sim::{
    build_app,
    config::SimConfig,
    resources::{PilotMode, SimStats, TickCounter},
    world::capture_snapshot,
};

#[fixture]
fn config() -> SimConfig {
    SimConfig {
        seed: 7,
        report_every: 0,
        ..SimConfig::default()
    }
}

fn run_until(app: &mut App, max_ticks: u64, mut done: impl FnMut(&World) -> bool) -> u64 {
    for tick in 0..max_ticks {
        app.update();
        if done(app.world()) {
            return tick;
        }
    }
    max_ticks
}

fn phase(world: &World) -> LevelPhaseKind {
    world.resource::<LevelState>().kind()
}

fn player_position(app: &mut App) -> Position {
    let mut query = app.world_mut().query_filtered::<&Position, With<PlayerMarker>>();
    *query.single(app.world()).expect("one player")
}

#[rstest]
fn idle_player_out_of_reach_stays_unnoticed(config: SimConfig) {
    let mut app = build_app(&SimConfig {
        pilot: PilotMode::Idle,
        stabilizer: false,
        ..config
    });
    run_until(&mut app, 300, |_| false);

    let snapshot = capture_snapshot(app.world_mut()).expect("level spawned");
    assert_eq!(snapshot.tick, 300);
    assert!(snapshot.sentinels.iter().all(|s| s.state == SentinelState::Dormant));
    assert!(snapshot.missiles.is_empty());
    assert!(!snapshot.player.infected);
    assert_relative_eq!(snapshot.player.mass_integrity, 1.0);

    let pos = player_position(&mut app);
    assert_relative_eq!(pos.x, 500.0);
    assert_relative_eq!(pos.y, 340.0);
}

#[rstest]
fn charging_a_sentinel_ends_in_game_over(config: SimConfig) {
    let mut app = build_app(&SimConfig {
        pilot: PilotMode::Charge,
        ..config
    });
    let ticks = run_until(&mut app, 3000, |world| phase(world) == LevelPhaseKind::GameOver);
    assert!(ticks < 3000, "player survived the charge");

    let stats = app.world().resource::<SimStats>().clone();
    assert_eq!(stats.deaths, 1);
    assert!(stats.infections >= 1);
    assert!(stats.hits_taken >= 6);
    assert!(stats.missiles_fired >= stats.hits_taken);
    assert!(stats.notes_played > 0);

    let snapshot = capture_snapshot(app.world_mut()).expect("level spawned");
    assert!(snapshot.player.dead);
    assert!(snapshot.player.mass_integrity <= 0.15);
    assert!(snapshot.sentinels.iter().any(|s| s.state == SentinelState::Critical));

    // Nothing moves once the level is over
    let frozen = player_position(&mut app);
    run_until(&mut app, 30, |_| false);
    assert_eq!(player_position(&mut app), frozen);
    assert_eq!(phase(app.world()), LevelPhaseKind::GameOver);
}

#[rstest]
fn death_restarts_from_the_first_cycle_when_asked(config: SimConfig) {
    let mut app = build_app(&SimConfig {
        pilot: PilotMode::Charge,
        restart_on_death: true,
        ..config
    });
    run_until(&mut app, 3000, |world| world.resource::<SimStats>().deaths == 1);
    app.update();

    assert_eq!(phase(app.world()), LevelPhaseKind::Playing);
    assert_eq!(app.world().resource::<LevelState>().cycle(), 1);

    let snapshot = capture_snapshot(app.world_mut()).expect("level respawned");
    assert!(!snapshot.player.dead);
    assert!(snapshot.missiles.is_empty());
    assert_eq!(snapshot.food, 0);
    assert_eq!(snapshot.sentinels.len(), 2);
}

#[rstest]
fn healthy_player_in_the_safe_zone_completes_the_cycle(config: SimConfig) {
    let mut app = build_app(&config);

    run_until(&mut app, 200, |world| phase(world) == LevelPhaseKind::Complete);
    assert_eq!(phase(app.world()), LevelPhaseKind::Complete);
    assert_eq!(app.world().resource::<SimStats>().levels_completed, 1);

    // The transition lasts 3 s, then the next cycle starts from scratch
    run_until(&mut app, 250, |world| phase(world) == LevelPhaseKind::Playing);
    assert_eq!(phase(app.world()), LevelPhaseKind::Playing);
    assert_eq!(app.world().resource::<LevelState>().cycle(), 2);
    app.update();
    let pos = player_position(&mut app);
    assert!(pos.x < 510.0, "player should be back near the spawn, got {pos:?}");
}

#[rstest]
fn same_seed_same_run(config: SimConfig) {
    let run = |config: &SimConfig| {
        let mut app = build_app(config);
        run_until(&mut app, 400, |_| false);
        capture_snapshot(app.world_mut()).expect("level spawned")
    };

    let first = run(&config);
    let second = run(&config);
    assert_eq!(first, second);
    assert_eq!(first.tick, 400);
}

#[rstest]
fn tick_counter_counts_every_update(config: SimConfig) {
    let mut app = build_app(&config);
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(app.world().resource::<TickCounter>().0, 10);
}
