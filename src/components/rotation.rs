use bevy_ecs::prelude::Component;

/// Orientation of the player mesh in radians.
///
/// `yaw` follows the walking direction. `pitch` and `roll` only change while
/// falling (tumble) and are zeroed on landing or respawn.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Facing {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Facing {
    /// Clear the tumble, keep the heading.
    pub fn level(&mut self) {
        self.pitch = 0.0;
        self.roll = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Facing::default();
    }
}
