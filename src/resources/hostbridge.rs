//! ECS resource bridging the session with the host shell.
//!
//! Use [`setup_host_bridge`] once during initialization. It creates both
//! channels, inserts the [`HostBridge`] resource plus the message buffers the
//! systems write to, and returns the host-side ends.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::host::{HostEnvelope, HostInbound, HostMessage};

/// Session side of the host channels.
#[derive(Resource)]
pub struct HostBridge {
    /// Outbound messages (session -> host).
    pub tx_msg: Sender<HostEnvelope>,
    /// Inbound commands (host -> session).
    pub rx_cmd: Receiver<HostInbound>,
}

/// Host side of the channels.
pub struct HostEndpoints {
    pub tx_cmd: Sender<HostInbound>,
    pub rx_msg: Receiver<HostEnvelope>,
}

/// Create the host channels and register bridge resources.
pub fn setup_host_bridge(world: &mut World) -> HostEndpoints {
    let (tx_cmd, rx_cmd) = unbounded::<HostInbound>();
    let (tx_msg, rx_msg) = unbounded::<HostEnvelope>();
    world.insert_resource(HostBridge { tx_msg, rx_cmd });
    world.insert_resource(Messages::<HostMessage>::default());
    HostEndpoints { tx_cmd, rx_msg }
}
