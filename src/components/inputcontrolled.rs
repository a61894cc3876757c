//! Input-controlled movement component.
//!
//! [`InputControlled`] marks the entity that the directional flags of
//! [`InputState`](crate::resources::input::InputState) steer. The movement
//! system in [`crate::systems::movement`] reads it to scale the normalized
//! direction into a per-tick displacement.

use bevy_ecs::prelude::Component;

/// Movement parameters for an input-driven entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    /// Base distance covered per reference tick (1/60 s) in world units.
    pub move_speed: f32,
    /// Multiplier supplied by the player settings.
    pub speed_multiplier: f32,
}

impl InputControlled {
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            speed_multiplier: 1.0,
        }
    }

    /// Effective distance per reference tick.
    pub fn speed(&self) -> f32 {
        self.move_speed * self.speed_multiplier
    }
}
