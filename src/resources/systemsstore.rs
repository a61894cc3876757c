//! Registry of state hook systems.
//!
//! The session registers one system per [`StateHook`] at construction. The
//! game state observer picks the hook for a transition and runs it through
//! its [`SystemId`].

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

use crate::resources::gamestate::GameStates;

/// One-shot systems run when entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateHook {
    /// Spawn the player and announce readiness.
    Setup,
    /// Reset the run for a new episode.
    StartEpisode,
    /// Close the current episode and go back to playing.
    Restart,
    /// Summarize the current episode before shutdown.
    QuitGame,
}

impl StateHook {
    /// Hook to run when moving from `old` to `new`, if any.
    ///
    /// Resuming from a pause keeps the running episode.
    pub fn on_enter(old: GameStates, new: GameStates) -> Option<Self> {
        match (old, new) {
            (_, GameStates::Setup) => Some(StateHook::Setup),
            (GameStates::Paused, GameStates::Playing) => None,
            (_, GameStates::Playing) => Some(StateHook::StartEpisode),
            (_, GameStates::Restart) => Some(StateHook::Restart),
            (_, GameStates::Quitting) => Some(StateHook::QuitGame),
            (_, GameStates::None | GameStates::Paused | GameStates::GameOver) => None,
        }
    }
}

#[derive(Resource, Default)]
pub struct SystemsStore {
    hooks: FxHashMap<StateHook, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hook: StateHook, id: SystemId) {
        if self.hooks.insert(hook, id).is_some() {
            log::warn!("Hook {:?} registered twice; keeping the latest", hook);
        }
    }

    pub fn get(&self, hook: StateHook) -> Option<SystemId> {
        self.hooks.get(&hook).copied()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_does_not_restart_episode() {
        assert_eq!(StateHook::on_enter(GameStates::Paused, GameStates::Playing), None);
        assert_eq!(
            StateHook::on_enter(GameStates::Setup, GameStates::Playing),
            Some(StateHook::StartEpisode)
        );
        assert_eq!(
            StateHook::on_enter(GameStates::Restart, GameStates::Playing),
            Some(StateHook::StartEpisode)
        );
    }

    #[test]
    fn test_hooks_for_lifecycle_states() {
        assert_eq!(
            StateHook::on_enter(GameStates::None, GameStates::Setup),
            Some(StateHook::Setup)
        );
        assert_eq!(
            StateHook::on_enter(GameStates::GameOver, GameStates::Restart),
            Some(StateHook::Restart)
        );
        assert_eq!(
            StateHook::on_enter(GameStates::Playing, GameStates::Quitting),
            Some(StateHook::QuitGame)
        );
        assert_eq!(StateHook::on_enter(GameStates::Playing, GameStates::GameOver), None);
    }
}
