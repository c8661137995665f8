use bevy_ecs::prelude::*;

// Marker components to disambiguate entity archetypes in the host.
#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct SentinelMarker;

#[derive(Component, Debug, Default)]
pub struct StabilizerMarker;

#[derive(Component, Debug, Default)]
pub struct FoodMarker;

// Everything that is torn down and rebuilt on a level restart
#[derive(Component, Debug, Default)]
pub struct LevelEntity;
