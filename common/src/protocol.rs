#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

use bevy_ecs::component::Component;
use bevy_math::Vec2;

use crate::{level::LevelPhaseKind, sentinel::SentinelState};

// Macro to reduce boilerplate for snapshot records
macro_rules! snapshot {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "bincode", derive(Encode, Decode))]
        pub struct $name $body
    };
}

// ============================================================================
// Common Data Types
// ============================================================================

// Position component - world units, origin at the top-left corner of the arena
#[derive(Debug, Clone, Copy, Component, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn offset(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct SentinelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub struct MissileId(pub u32);

// Cosmetic particle trail following a missile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct FoodId(pub u32);

// Axis-aligned rectangle (walls, safe zone)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn from_center(center: Position, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            x1: center.x - half_w,
            y1: center.y - half_h,
            x2: center.x + half_w,
            y2: center.y + half_h,
        }
    }

    #[must_use]
    pub fn center(&self) -> Position {
        Position {
            x: f32::midpoint(self.x1, self.x2),
            y: f32::midpoint(self.y1, self.y2),
        }
    }
}

// ============================================================================
// Snapshots
// ============================================================================

snapshot! {
struct PlayerSnapshot {
    pub pos: Position,
    pub mass_integrity: f32,
    pub infected: bool,
    pub stunned: bool,
    pub dead: bool,
}
}

snapshot! {
struct SentinelSnapshot {
    pub id: SentinelId,
    pub pos: Position,
    pub awareness: f32,
    pub state: SentinelState,
}
}

snapshot! {
struct MissileSnapshot {
    pub id: MissileId,
    pub pos: Position,
}
}

snapshot! {
// Whole-arena state at the end of a tick.
struct SimSnapshot {
    pub tick: u64,
    pub cycle: u32,
    pub phase: LevelPhaseKind,
    pub player: PlayerSnapshot,
    pub sentinels: Vec<SentinelSnapshot>,
    pub missiles: Vec<MissileSnapshot>,
    pub food: u32,
}
}
