//! Input systems.
//!
//! [`drain_input_events`] empties the input channel at the start of each tick
//! and folds every event into [`InputState`] and [`JoystickState`]:
//!
//! - key events set a single flag
//! - pointer events drive the virtual joystick and the jump button
//! - resizes re-derive the joystick geometry
//!
//! Joystick moves coalesce: the stick only remembers the latest coordinate,
//! and the directions are mapped once after the channel is empty.
use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::events::input::{InputEvent, PointerEvent, PointerPhase};
use crate::resources::input::{GameKey, InputState};
use crate::resources::inputchannel::InputReceiver;
use crate::resources::joystick::{GestureUpdate, JoystickState};

/// Drain pending input and update the `InputState` resource.
pub fn drain_input_events(
    receiver: Res<InputReceiver>,
    mut input: ResMut<InputState>,
    mut stick: ResMut<JoystickState>,
) {
    input.clear_edges();

    let mut remap = false;
    for event in receiver.rx.try_iter() {
        match event {
            InputEvent::Key { key, pressed } => {
                trace!("Key {:?} pressed={}", key, pressed);
                input.set_key(key, pressed);
            }
            InputEvent::Pointer(pointer) => {
                if handle_pointer(&pointer, &mut stick, &mut input) != GestureUpdate::Ignored {
                    remap = true;
                }
            }
            InputEvent::Resize { width, height } => {
                debug!("Viewport resized to {}x{}", width, height);
                stick.set_viewport(width, height);
                // keep a pending remap from an earlier release in this drain
                remap |= stick.is_active();
            }
        }
    }

    if remap {
        input.set_directions(stick.directions());
    }
}

fn handle_pointer(
    event: &PointerEvent,
    stick: &mut JoystickState,
    input: &mut InputState,
) -> GestureUpdate {
    match event.phase {
        PointerPhase::Down => {
            let update = stick.begin(event.pointer, event.position);
            if update == GestureUpdate::Ignored && stick.press_jump(event.pointer, event.position) {
                input.set_key(GameKey::Jump, true);
            }
            update
        }
        PointerPhase::Move => stick.move_to(event.pointer, event.position),
        PointerPhase::Up => {
            if stick.release_jump(event.pointer) {
                input.set_key(GameKey::Jump, false);
            }
            let update = stick.end(event.pointer);
            if update == GestureUpdate::Ignored {
                trace!("Pointer {:?} up outside an active gesture", event.pointer);
            }
            update
        }
        PointerPhase::Cancel => {
            if stick.release_jump(event.pointer) {
                input.set_key(GameKey::Jump, false);
            }
            stick.cancel()
        }
    }
}
