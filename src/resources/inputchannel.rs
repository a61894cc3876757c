//! Channel carrying raw input into the session.
//!
//! Input producers may live on another thread or inside a platform callback;
//! they hold a cloneable [`InputSender`]. The session owns the receiving end
//! as the [`InputReceiver`] resource and drains it once per tick.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TrySendError, unbounded};
use log::debug;

use crate::events::input::{InputEvent, PointerEvent, PointerPhase};
use crate::resources::input::GameKey;
use crate::resources::joystick::PointerId;

#[derive(Resource)]
pub struct InputReceiver {
    pub rx: Receiver<InputEvent>,
}

/// Producer handle. Sending never blocks; events sent after the session is
/// dropped are discarded.
#[derive(Clone, Debug)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

/// Create a linked sender/receiver pair.
pub fn input_channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = unbounded::<InputEvent>();
    (InputSender { tx }, InputReceiver { rx })
}

impl InputSender {
    pub fn send(&self, event: InputEvent) {
        if let Err(TrySendError::Disconnected(event)) = self.tx.try_send(event) {
            debug!("Input dropped, session gone: {:?}", event);
        }
    }

    pub fn key(&self, key: GameKey, pressed: bool) {
        self.send(InputEvent::Key { key, pressed });
    }

    pub fn pointer(&self, pointer: PointerId, phase: PointerPhase, x: f32, y: f32) {
        self.send(InputEvent::Pointer(PointerEvent::new(pointer, phase, x, y)));
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.send(InputEvent::Resize { width, height });
    }
}
