//! World-space position of an entity.
//!
//! The bridge runs along the z axis, x is lateral and y is height above the
//! walking surface (ground level is `y == 0`).

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Position in world units.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPosition {
    pub pos: Vec3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }

    pub fn from_vec3(pos: Vec3) -> Self {
        Self { pos }
    }
}
