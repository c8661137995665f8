use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::{
    collision::{calculate_wall_slide, clamp_to_world},
    constants::{PLAYER_RADIUS, PLAYER_SPEED},
    protocol::{Position, Rect},
    vitals::PlayerVitals,
};

// ============================================================================
// Player Input
// ============================================================================

// Held direction keys, each axis in {-1, 0, 1}
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub x: i8,
    pub y: i8,
}

impl PlayerInput {
    pub const IDLE: Self = Self { x: 0, y: 0 };

    // Steer toward a point, releasing an axis once within `deadzone` of it
    #[must_use]
    pub fn toward(from: Position, to: Position, deadzone: f32) -> Self {
        let axis = |d: f32| -> i8 {
            if d > deadzone {
                1
            } else if d < -deadzone {
                -1
            } else {
                0
            }
        };
        Self {
            x: axis(to.x - from.x),
            y: axis(to.y - from.y),
        }
    }
}

// ============================================================================
// Player Movement
// ============================================================================

// Axes are driven independently, so diagonals are faster, like the keyboard controls.
#[must_use]
pub fn player_velocity(input: PlayerInput, vitals: &PlayerVitals) -> Vec2 {
    if vitals.is_dead() || vitals.is_stunned() {
        return Vec2::ZERO;
    }
    let speed = PLAYER_SPEED * vitals.speed_multiplier();
    Vec2::new(f32::from(input.x) * speed, f32::from(input.y) * speed)
}

// Where the player ends up this tick: jitter, then input velocity, sliding along
// walls and staying inside the world.
#[must_use]
pub fn plan_player_move(
    pos: &Position,
    input: PlayerInput,
    vitals: &PlayerVitals,
    jitter: Vec2,
    walls: &[Rect],
    delta_secs: f32,
) -> Position {
    if vitals.is_dead() {
        return *pos;
    }

    let step = jitter + player_velocity(input, vitals) * delta_secs;
    if step == Vec2::ZERO {
        return *pos;
    }

    let moved = calculate_wall_slide(walls, PLAYER_RADIUS, pos, step);
    clamp_to_world(&moved, PLAYER_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::Infectable;
    use approx::assert_relative_eq;

    const DT: f32 = 0.5;

    #[test]
    fn full_speed_when_healthy() {
        let vitals = PlayerVitals::default();
        let input = PlayerInput { x: 1, y: 0 };
        let moved = plan_player_move(&Position::new(400.0, 300.0), input, &vitals, Vec2::ZERO, &[], DT);
        assert_relative_eq!(moved.x, 510.0);
        assert_relative_eq!(moved.y, 300.0);
    }

    #[test]
    fn infection_slows_by_a_quarter() {
        let mut vitals = PlayerVitals::default();
        vitals.infect();
        let v = player_velocity(PlayerInput { x: -1, y: 1 }, &vitals);
        assert_relative_eq!(v.x, -165.0);
        assert_relative_eq!(v.y, 165.0);
    }

    #[test]
    fn stunned_player_only_drifts_with_jitter() {
        let mut vitals = PlayerVitals::default();
        vitals.take_damage(0.15);
        let start = Position::new(400.0, 300.0);
        let moved = plan_player_move(&start, PlayerInput { x: 1, y: 1 }, &vitals, Vec2::new(1.0, -1.0), &[], DT);
        assert_eq!(moved, Position::new(401.0, 299.0));
    }

    #[test]
    fn dead_player_does_not_move() {
        let mut vitals = PlayerVitals::default();
        vitals.die();
        let start = Position::new(400.0, 300.0);
        let moved = plan_player_move(&start, PlayerInput { x: 1, y: 0 }, &vitals, Vec2::new(1.0, 0.0), &[], DT);
        assert_eq!(moved, start);
    }

    #[test]
    fn clamped_inside_world() {
        let vitals = PlayerVitals::default();
        let moved = plan_player_move(&Position::new(790.0, 300.0), PlayerInput { x: 1, y: 0 }, &vitals, Vec2::ZERO, &[], DT);
        assert_relative_eq!(moved.x, 780.0);
    }

    #[test]
    fn toward_respects_deadzone() {
        let from = Position::new(100.0, 100.0);
        assert_eq!(PlayerInput::toward(from, Position::new(200.0, 102.0), 4.0), PlayerInput { x: 1, y: 0 });
        assert_eq!(PlayerInput::toward(from, Position::new(50.0, 20.0), 4.0), PlayerInput { x: -1, y: -1 });
        assert_eq!(PlayerInput::toward(from, from, 4.0), PlayerInput::IDLE);
    }
}
