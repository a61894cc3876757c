//! Wire format of the host channel, and how a session answers host input.

use serde_json::{Value, json};

use steppingstone::events::host::{
    ControlCommand, GameEvent, HostCommand, HostEnvelope, HostMessage, PlayerAction, Position,
};
use steppingstone::game::GameSession;
use steppingstone::resources::gameconfig::GameConfig;
use steppingstone::resources::input::GameKey;
use steppingstone::resources::records::{Achievement, PlayerRecords};
use steppingstone::resources::worldtime::REFERENCE_TICK;

fn to_value(message: HostMessage) -> Value {
    let text = HostEnvelope {
        message,
        timestamp: 1234,
    }
    .to_json()
    .unwrap();
    serde_json::from_str(&text).unwrap()
}

fn errors(session: &GameSession) -> Vec<(String, String)> {
    session
        .host_messages()
        .try_iter()
        .filter_map(|envelope| match envelope.message {
            HostMessage::Error {
                error_type,
                message,
            } => Some((error_type, message)),
            _ => None,
        })
        .collect()
}

#[test]
fn envelope_carries_type_data_and_timestamp() {
    let value = to_value(HostMessage::Score {
        score: 120,
        distance: 12.5,
    });
    assert_eq!(
        value,
        json!({"type": "score", "data": {"score": 120, "distance": 12.5}, "timestamp": 1234})
    );
}

#[test]
fn nested_events_use_their_own_tags() {
    let value = to_value(HostMessage::GameEvent(GameEvent::Vibrate { duration_ms: 50 }));
    assert_eq!(value["type"], "game_event");
    assert_eq!(value["data"], json!({"event": "VIBRATE", "durationMs": 50}));

    let value = to_value(HostMessage::PlayerAction(PlayerAction::Land {
        position: Position {
            x: 0.5,
            y: 0.0,
            z: -2.0,
        },
        perfect: false,
    }));
    assert_eq!(value["type"], "player_action");
    assert_eq!(value["data"]["action"], "land");
    assert_eq!(value["data"]["position"]["z"], -2.0);
}

#[test]
fn achievement_omits_missing_fields() {
    let value = to_value(HostMessage::Achievement {
        achievement_id: "NEW_HIGH_SCORE".to_string(),
        score: Some(300),
        distance: None,
    });
    assert_eq!(
        value["data"],
        json!({"achievementId": "NEW_HIGH_SCORE", "score": 300})
    );
}

#[test]
fn statistics_use_camel_case_and_achievement_ids() {
    let mut records = PlayerRecords::default();
    records.best_score = 70;
    records.unlock(Achievement::Distance10);
    let value = to_value(HostMessage::Statistics(records));
    assert_eq!(value["type"], "statistics");
    assert_eq!(value["data"]["bestScore"], 70);
    assert_eq!(value["data"]["achievements"], json!(["DISTANCE_10"]));
}

#[test]
fn envelope_round_trips_through_json() {
    let envelope = HostEnvelope::now(HostMessage::GameEvent(GameEvent::GameReady {
        version: "1.2.3".to_string(),
    }));
    let text = envelope.to_json().unwrap();
    let back: HostEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back, envelope);
    assert!(back.timestamp > 0);
}

#[test]
fn commands_parse_from_host_json() {
    let command = HostCommand::from_json(r#"{"type":"GAME_CONTROL","command":"RESET_STATS"}"#)
        .unwrap();
    assert_eq!(
        command,
        HostCommand::GameControl {
            command: ControlCommand::ResetStats
        }
    );

    let command = HostCommand::from_json(
        r#"{"type":"SETTINGS_UPDATE","settings":{"vibration":false,"sfxVolume":0.25}}"#,
    )
    .unwrap();
    match command {
        HostCommand::SettingsUpdate { settings } => {
            assert_eq!(settings.vibration, Some(false));
            assert_eq!(settings.sfx_volume, Some(0.25));
            assert_eq!(settings.move_speed_multiplier, None);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unknown_commands_are_parse_errors() {
    for text in [
        "",
        "[]",
        r#"{"type":"LAUNCH_ROCKET"}"#,
        r#"{"type":"GAME_CONTROL","command":"FLY"}"#,
    ] {
        let err = HostCommand::from_json(text).unwrap_err();
        assert_eq!(err.error_type(), "MESSAGE_PARSE_ERROR", "{:?}", text);
    }
}

#[test]
fn session_answers_malformed_json_with_an_error() {
    let mut session =
        GameSession::with_records(GameConfig::new(), PlayerRecords::default()).unwrap();
    session.send_host_json("{oops");
    session.tick(REFERENCE_TICK);

    let errors = errors(&session);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "MESSAGE_PARSE_ERROR");
}

#[test]
fn session_rejects_out_of_range_settings() {
    let mut session =
        GameSession::with_records(GameConfig::new(), PlayerRecords::default()).unwrap();
    session.send_host_json(r#"{"type":"SETTINGS_UPDATE","settings":{"moveSpeedMultiplier":9.0}}"#);
    session.tick(REFERENCE_TICK);

    let errors = errors(&session);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "INVALID_SETTINGS");
    assert_eq!(session.settings().move_speed_multiplier, 1.0);
}

#[test]
fn disabling_vibration_silences_vibrate_events() {
    let mut session =
        GameSession::with_records(GameConfig::new(), PlayerRecords::default()).unwrap();
    let rx = session.host_messages();
    session.send_host_json(r#"{"type":"SETTINGS_UPDATE","settings":{"vibration":false}}"#);
    session.input_sender().key(GameKey::Jump, true);
    session.tick(REFERENCE_TICK);

    let messages: Vec<HostMessage> = rx.try_iter().map(|e| e.message).collect();
    assert!(messages.iter().any(|m| matches!(
        m,
        HostMessage::PlayerAction(PlayerAction::Jump { .. })
    )));
    assert!(!messages.iter().any(|m| matches!(
        m,
        HostMessage::GameEvent(GameEvent::Vibrate { .. })
    )));
}

#[test]
fn reset_stats_clears_records_and_reports_them() {
    let mut records = PlayerRecords::default();
    records.best_score = 900;
    records.total_games = 4;
    records.unlock(Achievement::Score500);
    let mut session = GameSession::with_records(GameConfig::new(), records).unwrap();
    let rx = session.host_messages();

    session.send_host_command(HostCommand::GameControl {
        command: ControlCommand::ResetStats,
    });
    session.tick(REFERENCE_TICK);

    assert_eq!(session.records(), &PlayerRecords::default());
    let reported = rx.try_iter().find_map(|e| match e.message {
        HostMessage::Statistics(records) => Some(records),
        _ => None,
    });
    assert_eq!(reported, Some(PlayerRecords::default()));
}

#[test]
fn control_commands_out_of_place_are_ignored() {
    let mut session =
        GameSession::with_records(GameConfig::new(), PlayerRecords::default()).unwrap();
    session.send_host_command(HostCommand::GameControl {
        command: ControlCommand::Resume,
    });
    session.tick(REFERENCE_TICK);
    assert_eq!(
        session.state(),
        steppingstone::resources::gamestate::GameStates::Playing
    );
    assert!(errors(&session).is_empty());
}
