//! Systems bridging the ECS world and the host channels.
//!
//! - [`apply_host_commands`] non-blockingly drains inbound commands, decodes
//!   and validates them, and applies them to settings, records or the game
//!   state. Rejected input is answered with an `error` message.
//! - [`forward_host_messages`] stamps every [`HostMessage`] written this tick
//!   and sends it to the host.
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::events::host::{ControlCommand, HostCommand, HostEnvelope, HostInbound, HostMessage};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, NextGameState};
use crate::resources::hostbridge::HostBridge;
use crate::resources::records::PlayerRecords;
use crate::resources::settings::Settings;

pub fn apply_host_commands(
    bridge: Res<HostBridge>,
    config: Res<GameConfig>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut settings: ResMut<Settings>,
    mut records: ResMut<PlayerRecords>,
    mut host: MessageWriter<HostMessage>,
) {
    for inbound in bridge.rx_cmd.try_iter() {
        let decoded = match inbound {
            HostInbound::Json(text) => HostCommand::from_json(&text),
            HostInbound::Command(command) => command.validate().map(|_| command),
        };
        let command = match decoded {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected host command: {}", e);
                host.write(e.to_host_message());
                continue;
            }
        };
        debug!("Host command {:?}", command);

        match command {
            HostCommand::SettingsUpdate { settings: update } => {
                if let Err(e) = settings.apply(&update) {
                    warn!("Rejected settings update: {}", e);
                }
            }
            HostCommand::GameControl {
                command: ControlCommand::ResetStats,
            } => {
                info!("Resetting player records");
                records.reset();
                if let Some(path) = config.records_path.as_deref()
                    && let Err(e) = records.save_to_file(path)
                {
                    warn!("{}", e);
                }
                host.write(HostMessage::Statistics(records.clone()));
            }
            HostCommand::GameControl { command } => match state.get().after_control(command) {
                Some(next) => next_state.set(next),
                None => debug!("Ignoring {:?} while {:?}", command, state.get()),
            },
        }
    }
}

/// Forward ECS host messages to the host via the bridge sender.
pub fn forward_host_messages(bridge: Res<HostBridge>, mut reader: MessageReader<HostMessage>) {
    for message in reader.read() {
        // the host may already be gone on shutdown
        let _ = bridge.tx_msg.send(HostEnvelope::now(message.clone()));
    }
}
