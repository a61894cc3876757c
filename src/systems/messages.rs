//! Message queue maintenance.
use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

/// Advance the ECS message queue for `M`.
///
/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame;
/// messages older than two updates are dropped. Runs first in the tick.
pub fn update_messages<M: Message>(mut messages: ResMut<Messages<M>>) {
    messages.update();
}
