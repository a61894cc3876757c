//! Player state-change notifications.
//!
//! Written by the movement, jump and bounds systems; read by the session
//! statistics, the audio cue and the host feedback systems.

use bevy_ecs::message::Message;
use glam::Vec3;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Horizontal movement started after standing still.
    StartedMoving { position: Vec3 },
    StoppedMoving { position: Vec3 },
    Jumped { position: Vec3 },
    /// The player left the bridge and started tumbling.
    FallStarted { position: Vec3 },
    Landed { position: Vec3, perfect: bool },
    /// Put back at the spawn point after falling.
    Respawned { position: Vec3 },
}
