//! Player marker and spawn point.
//!
//! Exactly one entity carries [`Player`]. Systems look it up with
//! `Query::single_mut` and skip the tick when it is missing (for example
//! while the host swaps the player model).

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Tag component for the player character.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Where the player reappears after falling off the bridge.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint(pub Vec3);

impl Default for SpawnPoint {
    fn default() -> Self {
        SpawnPoint(Vec3::ZERO)
    }
}
