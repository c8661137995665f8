use bevy_ecs::prelude::*;

use crate::{
    constants::{TILE_COLS, TILE_ROWS, TILE_SIZE, WORLD_HEIGHT, WORLD_WIDTH},
    protocol::{Position, Rect},
};

// ============================================================================
// Arena Layout
// ============================================================================

// Static description of the arena: walls, spawn points and the safe zone.
#[derive(Resource, Debug, Clone)]
pub struct ArenaLayout {
    pub walls: Vec<Rect>,
    pub sentinel_spawns: Vec<Position>,
    pub stabilizer_spawn: Option<Position>,
    pub player_spawn: Position,
    pub safe_zone: Rect,
}

// Center of a tile, in world units. Callers pass tiles inside the 20x15 grid.
#[must_use]
pub fn tile_center(col: i32, row: i32) -> Position {
    debug_assert!(
        (0..TILE_COLS).contains(&col) && (0..TILE_ROWS).contains(&row),
        "tile out of bounds: ({col}, {row})"
    );
    Position {
        x: (col as f32).mul_add(TILE_SIZE, TILE_SIZE / 2.0),
        y: (row as f32).mul_add(TILE_SIZE, TILE_SIZE / 2.0),
    }
}

// One tile thick ring of walls around the whole arena
#[must_use]
pub fn border_walls() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, WORLD_WIDTH, TILE_SIZE),
        Rect::new(0.0, WORLD_HEIGHT - TILE_SIZE, WORLD_WIDTH, WORLD_HEIGHT),
        Rect::new(0.0, 0.0, TILE_SIZE, WORLD_HEIGHT),
        Rect::new(WORLD_WIDTH - TILE_SIZE, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
    ]
}

impl ArenaLayout {
    // The lab: two sentinels on the west side, stabilizer up north, safe strip to the east
    #[must_use]
    pub fn inside() -> Self {
        Self {
            walls: border_walls(),
            sentinel_spawns: vec![tile_center(3, 2), tile_center(3, 10)],
            stabilizer_spawn: Some(tile_center(8, 4)),
            player_spawn: tile_center(12, 8),
            safe_zone: Rect::from_center(tile_center(16, 8), TILE_SIZE, WORLD_HEIGHT),
        }
    }

    #[must_use]
    pub fn without_stabilizer(mut self) -> Self {
        self.stabilizer_spawn = None;
        self
    }
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self::inside()
    }
}
