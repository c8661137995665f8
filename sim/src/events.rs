use bevy::prelude::*;

use common::{
    protocol::{FoodId, MissileId, Position, SentinelId},
    projectiles::ImpactKind,
};

// ============================================================================
// Bevy Messages for Audio/Visual Cues
// ============================================================================

/// Message fired when a missile leaves a sentinel
#[derive(Message, Debug, Clone)]
pub struct MissileFired {
    pub sentinel: SentinelId,
    pub missile: MissileId,
    pub origin: Position,
}

/// Message fired when a missile is spent against a wall or the player
#[derive(Message, Debug, Clone)]
pub struct MissileImpacted {
    pub missile: MissileId,
    pub kind: ImpactKind,
    pub position: Position,
}

/// Message fired when a missile strikes the player
#[derive(Message, Debug, Clone)]
pub struct DamageTaken {
    pub missile: MissileId,
    pub mass_integrity: f32,
}

/// Message fired when a sentinel passes its infection on to the player
#[derive(Message, Debug, Clone)]
pub struct PlayerInfected {
    pub sentinel: SentinelId,
}

/// Message fired when the safe zone clears an infection
#[derive(Message, Debug, Clone)]
pub struct InfectionCleansed;

/// Message fired once per life when mass integrity gives out
#[derive(Message, Debug, Clone)]
pub struct PlayerDied {
    pub position: Position,
}

/// Message fired for every note of a sentinel's warning arpeggio
#[derive(Message, Debug, Clone)]
pub struct ArpeggioNote {
    pub sentinel: SentinelId,
    pub frequency: f32,
    pub gain: f32,
}

/// Message fired when the player eats a piece of food
#[derive(Message, Debug, Clone)]
pub struct FoodEaten {
    pub food: FoodId,
    pub mass_integrity: f32,
}

/// Message fired when a healthy, clean player reaches the safe zone
#[derive(Message, Debug, Clone)]
pub struct LevelCompleted {
    pub cycle: u32,
}

/// Message fired after the level has been rebuilt
#[derive(Message, Debug, Clone)]
pub struct LevelRestarted {
    pub cycle: u32,
}
