//! Renderer-facing flags and scalars on the player.
//!
//! Gameplay systems publish what they decided this tick; renderers and
//! [`PlayerView`](crate::game::PlayerView) read it back without knowing the
//! systems.

use bevy_ecs::prelude::Component;
use rustc_hash::{FxHashMap, FxHashSet};

pub const MOVING: &str = "moving";
pub const JUMPING: &str = "jumping";
pub const FALLING: &str = "falling";
/// Current horizontal speed, 0 when idle.
pub const SPEED: &str = "speed";

#[derive(Debug, Clone, Component, Default)]
pub struct Signals {
    scalars: FxHashMap<&'static str, f32>,
    flags: FxHashSet<&'static str>,
}

impl Signals {
    pub fn set_scalar(&mut self, key: &'static str, value: f32) {
        self.scalars.insert(key, value);
    }

    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }

    /// Set or clear `key` depending on `on`.
    pub fn toggle_flag(&mut self, key: &'static str, on: bool) {
        if on {
            self.flags.insert(key);
        } else {
            self.flags.remove(key);
        }
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}
