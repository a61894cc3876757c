//! Raw input events.
//!
//! Producers (a window frontend, a touch layer, a test) push [`InputEvent`]s
//! through an [`InputSender`](crate::resources::inputchannel::InputSender).
//! They are drained at the start of every tick by
//! [`drain_input_events`](crate::systems::input::drain_input_events).

use glam::Vec2;

use crate::resources::input::GameKey;
use crate::resources::joystick::PointerId;

/// Lifecycle stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer (mouse or touch) sample in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            pointer,
            phase,
            position: Vec2::new(x, y),
        }
    }
}

/// Everything the core accepts from an input surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A logical key was pressed (`true`) or released (`false`).
    Key { key: GameKey, pressed: bool },
    Pointer(PointerEvent),
    /// The viewport changed size; joystick radii follow it.
    Resize { width: f32, height: f32 },
}
