//! Bridge bounds check.
//!
//! Runs after the movement and vertical physics of the tick. A player that is
//! no longer standing on the deck, is at or below the ground tolerance, and is
//! not already falling is switched to falling. A jump is not protection:
//! coming down off the side counts as leaving the bridge.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::jumpbody::JumpBody;
use crate::components::player::Player;
use crate::components::position::WorldPosition;
use crate::events::player::PlayerEvent;
use crate::resources::bridge::BridgeGeometry;

pub fn check_bridge_bounds(
    bridge: Res<BridgeGeometry>,
    mut query: Query<(&WorldPosition, &mut JumpBody), With<Player>>,
    mut events: MessageWriter<PlayerEvent>,
) {
    let Ok((position, mut body)) = query.single_mut() else {
        return;
    };
    let pos = position.pos;
    if bridge.is_on_bridge(pos) || pos.y > bridge.ground_tolerance {
        return;
    }
    if body.force_fall() {
        info!("Player left the bridge at {:?}", pos);
        events.write(PlayerEvent::FallStarted { position: pos });
    }
}
