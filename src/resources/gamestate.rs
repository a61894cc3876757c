//! High-level game state resources.
//!
//! [`GameState`] is the authoritative state; [`NextGameState`] holds a
//! requested transition until `crate::events::gamestate` applies it and runs
//! the enter hook.
//!
//! ```text
//! None -> Setup -> Playing <-> Paused
//!                    |  ^
//!          (fall)    v  | (restart)
//!                 GameOver -> Restart
//! any -> Quitting
//! ```

use bevy_ecs::prelude::Resource;

use crate::events::host::ControlCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// World is being populated.
    Setup,
    Playing,
    Paused,
    /// Episode ended under [`FallPolicy::GameOver`](crate::resources::gameconfig::FallPolicy).
    GameOver,
    /// Transient: resets the episode, then moves on to `Playing`.
    Restart,
    Quitting,
}

impl GameStates {
    /// Whether gameplay systems run in this state.
    pub fn simulates(self) -> bool {
        self == GameStates::Playing
    }

    /// State a host control command leads to from `self`, or `None` when the
    /// command does not apply here. `ResetStats` never changes the state.
    pub fn after_control(self, command: ControlCommand) -> Option<GameStates> {
        match (command, self) {
            (ControlCommand::Pause, GameStates::Playing) => Some(GameStates::Paused),
            (ControlCommand::Resume, GameStates::Paused) => Some(GameStates::Playing),
            (
                ControlCommand::Restart,
                GameStates::Playing | GameStates::Paused | GameStates::GameOver,
            ) => Some(GameStates::Restart),
            _ => None,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> GameStates {
        self.current
    }

    /// Overwrite the state without running hooks. Transitions that need
    /// their hook go through [`NextGameState`].
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Requested transition, if any.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextGameState {
    pending: Option<GameStates>,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a transition; the last request before it is applied wins.
    pub fn set(&mut self, next: GameStates) {
        self.pending = Some(next);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<GameStates> {
        self.pending
    }

    /// Take the pending request, leaving nothing behind.
    pub fn take(&mut self) -> Option<GameStates> {
        self.pending.take()
    }
}
