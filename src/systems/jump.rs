//! Jump and fall physics.
//!
//! - [`player_jump`] starts a jump on a fresh jump press.
//! - [`vertical_physics`] integrates gravity while airborne, tumbles a falling
//!   player, lands it on the deck, and ends the episode once it has fallen
//!   below the respawn depth.
//!
//! All per-tick constants are scaled by [`WorldTime::tick_scale`].
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::jumpbody::JumpBody;
use crate::components::player::Player;
use crate::components::position::WorldPosition;
use crate::components::rotation::Facing;
use crate::components::signals::{FALLING, JUMPING, Signals};
use crate::events::episode::EpisodeEnded;
use crate::events::player::PlayerEvent;
use crate::resources::bridge::BridgeGeometry;
use crate::resources::input::InputState;
use crate::resources::session::EpisodeEndReason;
use crate::resources::worldtime::WorldTime;

/// Pitch added per reference tick while tumbling.
pub const TUMBLE_PITCH: f32 = 0.05;
/// Roll added per reference tick while tumbling.
pub const TUMBLE_ROLL: f32 = 0.03;

/// Vertical tuning, copied from the configuration at session start.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct JumpTuning {
    pub impulse: f32,
    pub gravity: f32,
    pub respawn_depth: f32,
}

/// Start a jump when the jump action was pressed this tick.
pub fn player_jump(
    input: Res<InputState>,
    tuning: Res<JumpTuning>,
    mut query: Query<(&WorldPosition, &mut JumpBody), With<Player>>,
    mut events: MessageWriter<PlayerEvent>,
) {
    if !input.jump.just_pressed {
        return;
    }
    let Ok((position, mut body)) = query.single_mut() else {
        return;
    };
    if body.start_jump(tuning.impulse) {
        debug!("Jump at {:?}", position.pos);
        events.write(PlayerEvent::Jumped {
            position: position.pos,
        });
    } else {
        debug!("Jump ignored while {:?}", body.phase());
    }
}

/// Integrate the vertical motion of an airborne player.
pub fn vertical_physics(
    time: Res<WorldTime>,
    tuning: Res<JumpTuning>,
    bridge: Res<BridgeGeometry>,
    mut query: Query<
        (
            &mut WorldPosition,
            &mut Facing,
            &mut JumpBody,
            &mut Signals,
        ),
        With<Player>,
    >,
    mut events: MessageWriter<PlayerEvent>,
    mut commands: Commands,
) {
    let Ok((mut position, mut facing, mut body, mut signals)) = query.single_mut() else {
        return;
    };

    if !body.is_grounded() {
        let scale = time.tick_scale();
        body.velocity += tuning.gravity * scale;
        position.pos.y += body.velocity * scale;

        if body.is_falling() {
            facing.pitch += TUMBLE_PITCH * scale;
            facing.roll += TUMBLE_ROLL * scale;
        }

        if position.pos.y <= 0.0 && bridge.contains_xz(position.pos.x, position.pos.z) {
            position.pos.y = 0.0;
            facing.level();
            body.land();
            let perfect = bridge.is_perfect_landing(position.pos.x);
            debug!("Landed at {:?}, perfect={}", position.pos, perfect);
            events.write(PlayerEvent::Landed {
                position: position.pos,
                perfect,
            });
        } else if body.is_falling() && position.pos.y < tuning.respawn_depth {
            info!("Fell below {} at {:?}", tuning.respawn_depth, position.pos);
            commands.trigger(EpisodeEnded {
                reason: EpisodeEndReason::Fell,
            });
        }
    }

    signals.toggle_flag(JUMPING, body.is_jumping());
    signals.toggle_flag(FALLING, body.is_falling());
}
