use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_time::{Timer, TimerMode};
use rand::Rng;

use crate::{
    collision::overlap_circle_vs_circle,
    constants::*,
    protocol::{FoodId, Position},
    vitals::PlayerVitals,
};

// ============================================================================
// Food Spawner
// ============================================================================

// Drops food into the risky middle of the arena on a fixed cadence, up to a cap.
#[derive(Resource, Debug)]
pub struct FoodSpawner {
    timer: Timer,
    next_id: u32,
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self {
            timer: Timer::new(FOOD_SPAWN_INTERVAL, TimerMode::Repeating),
            next_id: 0,
        }
    }
}

impl FoodSpawner {
    // Yields at most one spawn per call; a cadence tick with the cap reached is skipped.
    pub fn tick<R: Rng>(&mut self, delta: Duration, active: usize, rng: &mut R) -> Option<(FoodId, Position)> {
        self.timer.tick(delta);
        if !self.timer.just_finished() || active >= FOOD_MAX_ACTIVE {
            return None;
        }

        let pos = Position::new(
            rng.random_range(FOOD_AREA_X.0..=FOOD_AREA_X.1),
            rng.random_range(FOOD_AREA_Y.0..=FOOD_AREA_Y.1),
        );
        let id = FoodId(self.next_id);
        self.next_id += 1;
        Some((id, pos))
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }
}

// ============================================================================
// Eating
// ============================================================================

#[must_use]
pub fn touches_food(player_pos: &Position, food_pos: &Position) -> bool {
    overlap_circle_vs_circle(player_pos, PLAYER_RADIUS, food_pos, FOOD_RADIUS)
}

// True when the food should be consumed (the player actually healed)
pub fn eat(vitals: &mut PlayerVitals) -> bool {
    !vitals.is_dead() && vitals.heal(FOOD_HEAL)
}
