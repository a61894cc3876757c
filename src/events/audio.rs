//! Audio cues for the sound collaborator.
//!
//! The core only decides *when* a sound should play; loading and playback
//! belong to whoever drains
//! [`GameSession::drain_audio_cues`](crate::game::GameSession::drain_audio_cues).

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Jump,
    FallStart,
    Land { perfect: bool },
}
