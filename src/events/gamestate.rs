//! Game state transition event and observer.
//!
//! Systems request a change by setting [`NextGameState`] and triggering
//! [`GameStateChangedEvent`] (or leave it to
//! [`check_pending_state`](crate::systems::gamestate::check_pending_state) at
//! the end of the tick). The observer applies the transition, reports the new
//! status to the host and runs the enter hook from
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore).
use crate::events::host::{GameStatus, HostMessage};
use crate::resources::gamestate::{GameState, NextGameState};
use crate::resources::systemsstore::{StateHook, SystemsStore};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Apply whatever [`NextGameState`] holds.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// A request for the state already current is dropped without a status
/// message or hook.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
    systems_store: Res<SystemsStore>,
    mut host: MessageWriter<HostMessage>,
) {
    let Some(new_state) = next_game_state.take() else {
        debug!("No state change pending.");
        return;
    };
    let old_state = game_state.get();
    if old_state == new_state {
        debug!("Already in {:?}", new_state);
        return;
    }

    info!("Transitioning from {:?} to {:?}", old_state, new_state);
    game_state.set(new_state);
    host.write(HostMessage::GameStatus {
        status: GameStatus::from(new_state),
    });

    let Some(hook) = StateHook::on_enter(old_state, new_state) else {
        return;
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(id),
        None => warn!("Hook {:?} not registered", hook),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gamestate::GameStates;

    #[derive(Resource, Default)]
    struct Entered(Vec<&'static str>);

    fn world_with_hooks() -> World {
        let mut world = World::new();
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.init_resource::<Messages<HostMessage>>();
        world.init_resource::<Entered>();

        let mut store = SystemsStore::new();
        store.insert(
            StateHook::StartEpisode,
            world.register_system(|mut entered: ResMut<Entered>| entered.0.push("start")),
        );
        store.insert(
            StateHook::Setup,
            world.register_system(|mut entered: ResMut<Entered>| entered.0.push("setup")),
        );
        world.insert_resource(store);
        world.add_observer(observe_gamestate_change_event);
        world.flush();
        world
    }

    fn go(world: &mut World, state: GameStates) {
        world.resource_mut::<NextGameState>().set(state);
        world.trigger(GameStateChangedEvent {});
        world.flush();
    }

    #[test]
    fn test_transition_runs_hook_and_reports_status() {
        let mut world = world_with_hooks();
        go(&mut world, GameStates::Setup);
        go(&mut world, GameStates::Playing);
        go(&mut world, GameStates::Paused);
        go(&mut world, GameStates::Playing);

        assert_eq!(world.resource::<GameState>().get(), GameStates::Playing);
        assert_eq!(world.resource::<Entered>().0, vec!["setup", "start"]);
        let statuses: Vec<GameStatus> = world
            .resource_mut::<Messages<HostMessage>>()
            .drain()
            .filter_map(|m| match m {
                HostMessage::GameStatus { status } => Some(status),
                _ => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                GameStatus::Loading,
                GameStatus::Playing,
                GameStatus::Paused,
                GameStatus::Playing
            ]
        );
    }

    #[test]
    fn test_same_state_is_ignored() {
        let mut world = world_with_hooks();
        go(&mut world, GameStates::Setup);
        go(&mut world, GameStates::Setup);
        assert_eq!(world.resource::<Entered>().0, vec!["setup"]);
        assert!(!world.resource::<NextGameState>().is_pending());
    }
}
