//! State plumbing inside the tick.
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, NextGameState};
use bevy_ecs::prelude::*;

/// Fire [`GameStateChangedEvent`] when a transition was requested during the
/// tick.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Run condition for the gameplay chain.
pub fn state_is_playing(state: Res<GameState>) -> bool {
    state.get().simulates()
}
