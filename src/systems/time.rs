//! Simulation clock.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Step [`WorldTime`] by `dt` seconds before the update schedule runs.
///
/// `dt` is what the frame pacer released, already clamped.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().step(dt);
}
