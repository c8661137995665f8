use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use rand::Rng;

use crate::{
    collision::{calculate_wall_slide, clamp_to_world, overlap_circle_vs_circle},
    constants::*,
    protocol::{Position, Rect},
};

// ============================================================================
// Stabilizer
// ============================================================================

// Slow wanderer near the middle of the arena. Touching it calms an infected player.
#[derive(Component, Debug, Clone)]
pub struct Stabilizer {
    velocity: Vec2,
    // Time left before picking a new destination
    move_timer: Duration,
}

impl Stabilizer {
    #[must_use]
    pub fn new<R: Rng>(pos: Position, rng: &mut R) -> Self {
        let mut stabilizer = Self {
            velocity: Vec2::ZERO,
            move_timer: Duration::ZERO,
        };
        stabilizer.choose_new_target(pos, rng);
        stabilizer
    }

    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn choose_new_target<R: Rng>(&mut self, pos: Position, rng: &mut R) {
        let destination = Position::new(
            rng.random_range(STABILIZER_AREA_X.0..=STABILIZER_AREA_X.1),
            rng.random_range(STABILIZER_AREA_Y.0..=STABILIZER_AREA_Y.1),
        );
        self.velocity = (destination.to_vec2() - pos.to_vec2()).normalize_or_zero() * STABILIZER_SPEED;
        self.move_timer =
            Duration::from_millis(rng.random_range(STABILIZER_RETARGET_MIN_MS..=STABILIZER_RETARGET_MAX_MS));
    }

    // Returns the new position. Keeps heading the same way until the timer runs out,
    // even past the destination.
    pub fn update<R: Rng>(&mut self, pos: Position, delta: Duration, walls: &[Rect], rng: &mut R) -> Position {
        self.move_timer = self.move_timer.saturating_sub(delta);
        if self.move_timer.is_zero() {
            self.choose_new_target(pos, rng);
        }

        let step = self.velocity * delta.as_secs_f32();
        let moved = calculate_wall_slide(walls, STABILIZER_RADIUS, &pos, step);
        clamp_to_world(&moved, STABILIZER_RADIUS)
    }
}

#[must_use]
pub fn touches(stabilizer_pos: &Position, player_pos: &Position) -> bool {
    overlap_circle_vs_circle(stabilizer_pos, STABILIZER_RADIUS, player_pos, PLAYER_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn wanders_at_constant_speed() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Position::new(100.0, 100.0);
        let stabilizer = Stabilizer::new(start, &mut rng);
        assert_relative_eq!(stabilizer.velocity().length(), STABILIZER_SPEED, epsilon = 1e-3);
        // Always heads into the center box from the corner
        assert!(stabilizer.velocity().x > 0.0 && stabilizer.velocity().y > 0.0);
    }

    #[test]
    fn retargets_only_when_the_timer_runs_out() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pos = Position::new(400.0, 300.0);
        let mut stabilizer = Stabilizer::new(pos, &mut rng);
        let heading = stabilizer.velocity();

        // Minimum retarget window is 2 s
        for _ in 0..19 {
            pos = stabilizer.update(pos, Duration::from_millis(100), &[], &mut rng);
            assert_eq!(stabilizer.velocity(), heading);
        }

        let mut changed = false;
        for _ in 0..25 {
            pos = stabilizer.update(pos, Duration::from_millis(100), &[], &mut rng);
            changed |= stabilizer.velocity() != heading;
        }
        assert!(changed);
    }

    #[test]
    fn contact_range_is_both_radii() {
        let a = Position::new(300.0, 300.0);
        assert!(touches(&a, &Position::new(340.0, 300.0)));
        assert!(!touches(&a, &Position::new(341.0, 300.0)));
    }
}
