use bevy_math::Vec2;

use crate::{
    constants::{WORLD_HEIGHT, WORLD_WIDTH},
    protocol::{Position, Rect},
};

// ============================================================================
// Overlap Helpers
// ============================================================================

// Check if two 1D ranges overlap.
#[must_use]
pub fn ranges_overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max >= b_min && a_min <= b_max
}

#[must_use]
pub fn rect_contains(rect: &Rect, pos: &Position) -> bool {
    pos.x >= rect.x1 && pos.x <= rect.x2 && pos.y >= rect.y1 && pos.y <= rect.y2
}

// Circle vs axis-aligned rect: closest point on the rect within the radius.
#[must_use]
pub fn overlap_circle_vs_rect(center: &Position, radius: f32, rect: &Rect) -> bool {
    if !ranges_overlap_1d(center.x - radius, center.x + radius, rect.x1, rect.x2)
        || !ranges_overlap_1d(center.y - radius, center.y + radius, rect.y1, rect.y2)
    {
        return false;
    }

    let closest_x = center.x.clamp(rect.x1, rect.x2);
    let closest_y = center.y.clamp(rect.y1, rect.y2);
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx.mul_add(dx, dy * dy) <= radius * radius
}

#[must_use]
pub fn overlap_circle_vs_circle(a: &Position, a_radius: f32, b: &Position, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx.mul_add(dx, dy * dy) <= reach * reach
}

#[must_use]
pub fn overlaps_any_wall(center: &Position, radius: f32, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| overlap_circle_vs_rect(center, radius, wall))
}

#[must_use]
pub fn outside_world(pos: &Position) -> bool {
    pos.x < 0.0 || pos.x > WORLD_WIDTH || pos.y < 0.0 || pos.y > WORLD_HEIGHT
}

// ============================================================================
// Movement Resolution
// ============================================================================

// Slide a circular body along walls: try the full move, then each axis alone.
#[must_use]
pub fn calculate_wall_slide(walls: &[Rect], radius: f32, current: &Position, step: Vec2) -> Position {
    let full = current.offset(step);
    if !overlaps_any_wall(&full, radius, walls) {
        return full;
    }

    let x_only = current.offset(Vec2::new(step.x, 0.0));
    if step.x != 0.0 && !overlaps_any_wall(&x_only, radius, walls) {
        return x_only;
    }

    let y_only = current.offset(Vec2::new(0.0, step.y));
    if step.y != 0.0 && !overlaps_any_wall(&y_only, radius, walls) {
        return y_only;
    }

    *current
}

// Keep a circular body fully inside the world
#[must_use]
pub fn clamp_to_world(pos: &Position, radius: f32) -> Position {
    Position {
        x: pos.x.clamp(radius, WORLD_WIDTH - radius),
        y: pos.y.clamp(radius, WORLD_HEIGHT - radius),
    }
}
