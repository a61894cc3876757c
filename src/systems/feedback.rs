//! Turns player events into audio cues, haptics and host notifications.
use bevy_ecs::prelude::*;

use crate::events::audio::AudioCue;
use crate::events::host::{GameEvent, HostMessage, PlayerAction};
use crate::events::player::PlayerEvent;
use crate::resources::settings::Settings;

/// Vibration on jump, in milliseconds.
pub const JUMP_VIBRATION_MS: u32 = 50;
/// Vibration when the player starts falling.
pub const FALL_VIBRATION_MS: u32 = 200;

pub fn player_feedback(
    settings: Res<Settings>,
    mut reader: MessageReader<PlayerEvent>,
    mut audio: MessageWriter<AudioCue>,
    mut host: MessageWriter<HostMessage>,
) {
    let vibrate = |host: &mut MessageWriter<HostMessage>, duration_ms: u32| {
        if settings.vibration {
            host.write(HostMessage::GameEvent(GameEvent::Vibrate { duration_ms }));
        }
    };

    for event in reader.read() {
        match *event {
            PlayerEvent::Jumped { position } => {
                audio.write(AudioCue::Jump);
                host.write(HostMessage::PlayerAction(PlayerAction::Jump {
                    position: position.into(),
                }));
                vibrate(&mut host, JUMP_VIBRATION_MS);
            }
            PlayerEvent::FallStarted { position } => {
                audio.write(AudioCue::FallStart);
                host.write(HostMessage::PlayerAction(PlayerAction::Fall {
                    position: position.into(),
                }));
                vibrate(&mut host, FALL_VIBRATION_MS);
            }
            PlayerEvent::Landed { position, perfect } => {
                audio.write(AudioCue::Land { perfect });
                host.write(HostMessage::PlayerAction(PlayerAction::Land {
                    position: position.into(),
                    perfect,
                }));
            }
            PlayerEvent::StartedMoving { position } => {
                host.write(HostMessage::PlayerAction(PlayerAction::Move {
                    position: position.into(),
                }));
            }
            PlayerEvent::StoppedMoving { .. } => {}
            PlayerEvent::Respawned { position } => {
                host.write(HostMessage::GameEvent(GameEvent::Respawned {
                    position: position.into(),
                }));
            }
        }
    }
}
