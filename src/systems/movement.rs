//! Horizontal movement of the player.
//!
//! Directional flags become a vector on the ground plane: right is `+x`,
//! left `-x`, down (towards the camera) `+z` and up (along the bridge) `-z`.
//! Diagonals are normalized so every direction covers the same distance.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::inputcontrolled::InputControlled;
use crate::components::player::Player;
use crate::components::position::WorldPosition;
use crate::components::rotation::Facing;
use crate::components::signals::{MOVING, SPEED, Signals};
use crate::events::player::PlayerEvent;
use crate::resources::input::{DirectionFlags, InputState};
use crate::resources::worldtime::WorldTime;

/// Unit `(x, z)` direction for the given flags, or zero when they cancel out.
pub fn movement_vector(dirs: DirectionFlags) -> Vec2 {
    let mut v = Vec2::ZERO;
    if dirs.right {
        v.x += 1.0;
    }
    if dirs.left {
        v.x -= 1.0;
    }
    if dirs.down {
        v.y += 1.0;
    }
    if dirs.up {
        v.y -= 1.0;
    }
    v.normalize_or_zero()
}

/// Heading for a non-zero `(x, z)` direction: `0` faces `+z`, `π` faces `-z`.
pub fn yaw_for(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}

/// Move the player along the held direction and turn it to face that way.
pub fn player_movement(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut query: Query<
        (
            &InputControlled,
            &mut WorldPosition,
            &mut Facing,
            &mut Signals,
        ),
        With<Player>,
    >,
    mut events: MessageWriter<PlayerEvent>,
) {
    let Ok((controlled, mut position, mut facing, mut signals)) = query.single_mut() else {
        return;
    };

    let direction = movement_vector(input.directions());
    let moving = direction != Vec2::ZERO;
    let was_moving = signals.has_flag(MOVING);

    if moving {
        let step = direction * controlled.speed() * time.tick_scale();
        position.pos.x += step.x;
        position.pos.z += step.y;
        facing.yaw = yaw_for(direction);
        signals.set_scalar(SPEED, controlled.speed());
    } else {
        signals.set_scalar(SPEED, 0.0);
    }
    signals.toggle_flag(MOVING, moving);

    if moving && !was_moving {
        events.write(PlayerEvent::StartedMoving {
            position: position.pos,
        });
    } else if !moving && was_moving {
        events.write(PlayerEvent::StoppedMoving {
            position: position.pos,
        });
    }
}
