//! Messages exchanged with the embedding host shell.
//!
//! Outbound: [`HostMessage`] values are written as ECS messages by the
//! feedback systems, stamped into a [`HostEnvelope`] and sent on the host
//! channel. On the wire each one is
//! `{"type": "...", "data": {...}, "timestamp": <ms since epoch>}`.
//!
//! Inbound: the host sends JSON text which [`HostCommand::from_json`] parses
//! and validates. Anything malformed becomes a [`HostDecodeError`] and never
//! reaches game state.

use std::time::{SystemTime, UNIX_EPOCH};

use bevy_ecs::message::Message;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::gamestate::GameStates;
use crate::resources::records::PlayerRecords;
use crate::resources::session::SessionSummary;
use crate::resources::settings::{Settings, SettingsError, SettingsUpdate};

pub const GAME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status names the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Loading,
    Menu,
    Playing,
    Paused,
    GameOver,
    Restart,
}

impl From<GameStates> for GameStatus {
    fn from(state: GameStates) -> Self {
        match state {
            GameStates::None | GameStates::Setup => GameStatus::Loading,
            GameStates::Playing => GameStatus::Playing,
            GameStates::Paused => GameStatus::Paused,
            GameStates::GameOver => GameStatus::GameOver,
            GameStates::Restart => GameStatus::Restart,
            GameStates::Quitting => GameStatus::Menu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlayerAction {
    Jump { position: Position },
    Move { position: Position },
    Fall { position: Position },
    Land { position: Position, perfect: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    GameReady {
        version: String,
    },
    /// Haptic feedback request.
    Vibrate {
        #[serde(rename = "durationMs")]
        duration_ms: u32,
    },
    Respawned {
        position: Position,
    },
}

#[derive(Message, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HostMessage {
    Score {
        score: u32,
        distance: f32,
    },
    GameStatus {
        status: GameStatus,
    },
    PlayerAction(PlayerAction),
    GameEvent(GameEvent),
    Statistics(PlayerRecords),
    Achievement {
        #[serde(rename = "achievementId")]
        achievement_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<f32>,
    },
    SessionData(SessionSummary),
    Error {
        #[serde(rename = "errorType")]
        error_type: String,
        message: String,
    },
    Settings(Settings),
}

/// A [`HostMessage`] with the time it was emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEnvelope {
    #[serde(flatten)]
    pub message: HostMessage,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HostEnvelope {
    /// Stamp `message` with the current wall-clock time.
    pub fn now(message: HostMessage) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self { message, timestamp }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlCommand {
    Pause,
    Resume,
    Restart,
    ResetStats,
}

/// Commands accepted from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostCommand {
    SettingsUpdate { settings: SettingsUpdate },
    GameControl { command: ControlCommand },
}

/// What the host channel carries into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum HostInbound {
    /// JSON text straight from the transport.
    Json(String),
    /// An already-typed command.
    Command(HostCommand),
}

#[derive(Debug, Error)]
pub enum HostDecodeError {
    #[error("malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}

impl HostDecodeError {
    /// Error type reported back to the host.
    pub fn error_type(&self) -> &'static str {
        match self {
            HostDecodeError::Malformed(_) => "MESSAGE_PARSE_ERROR",
            HostDecodeError::InvalidSettings(_) => "INVALID_SETTINGS",
        }
    }

    /// The `error` message reporting this failure.
    pub fn to_host_message(&self) -> HostMessage {
        HostMessage::Error {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
        }
    }
}

impl HostCommand {
    /// Parse and validate a command from JSON text.
    pub fn from_json(text: &str) -> Result<Self, HostDecodeError> {
        let command: HostCommand = serde_json::from_str(text)?;
        command.validate()?;
        Ok(command)
    }

    pub fn validate(&self) -> Result<(), HostDecodeError> {
        if let HostCommand::SettingsUpdate { settings } = self {
            settings.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(GameStatus::from(GameStates::GameOver), GameStatus::GameOver);
        assert_eq!(
            serde_json::to_string(&GameStatus::GameOver).unwrap(),
            "\"gameover\""
        );
        assert_eq!(GameStatus::from(GameStates::Setup), GameStatus::Loading);
    }

    #[test]
    fn test_decode_error_kinds() {
        let err = HostCommand::from_json("{not json").unwrap_err();
        assert_eq!(err.error_type(), "MESSAGE_PARSE_ERROR");

        let err = HostCommand::from_json(
            r#"{"type":"SETTINGS_UPDATE","settings":{"touchSensitivity":0.01}}"#,
        )
        .unwrap_err();
        assert_eq!(err.error_type(), "INVALID_SETTINGS");
        match err.to_host_message() {
            HostMessage::Error { error_type, .. } => assert_eq!(error_type, "INVALID_SETTINGS"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
