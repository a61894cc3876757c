//! The game session: world construction, state hooks and the per-tick driver.
//!
//! [`GameSession`] owns the ECS [`World`] and the update [`Schedule`]. A host
//! creates one, pushes input through [`GameSession::input_sender`], calls
//! [`GameSession::tick`] once per frame and reads back:
//!
//! - the player pose for rendering ([`GameSession::player_view`])
//! - audio cues ([`GameSession::drain_audio_cues`])
//! - host messages (the receiver from [`GameSession::host_messages`])
//!
//! Tick order: message buffers advance, host commands are applied, input is
//! drained and the joystick mapped, then movement, jump physics, the bounds
//! check, score, statistics and achievements run while playing. Feedback is
//! generated, pending state transitions are applied, and the host messages
//! of the tick are forwarded last.

use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ScheduleBuildError;
use bevy_ecs::system::SystemId;
use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;
use log::{info, warn};
use thiserror::Error;

use crate::components::inputcontrolled::InputControlled;
use crate::components::jumpbody::{JumpBody, JumpPhase};
use crate::components::player::{Player, SpawnPoint};
use crate::components::position::WorldPosition;
use crate::components::rotation::Facing;
use crate::components::signals::{MOVING, Signals};
use crate::events::audio::AudioCue;
use crate::events::episode::{EpisodeEnded, observe_episode_ended, reset_run};
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::host::{GAME_VERSION, GameEvent, HostCommand, HostEnvelope, HostInbound, HostMessage};
use crate::events::player::PlayerEvent;
use crate::resources::bridge::BridgeGeometry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::hostbridge::setup_host_bridge;
use crate::resources::input::InputState;
use crate::resources::inputchannel::{InputSender, input_channel};
use crate::resources::joystick::JoystickState;
use crate::resources::records::PlayerRecords;
use crate::resources::score::ScoreState;
use crate::resources::session::{Episode, EpisodeEndReason, SessionStats};
use crate::resources::settings::Settings;
use crate::resources::systemsstore::{StateHook, SystemsStore};
use crate::resources::worldtime::{FramePacer, WorldTime};
use crate::systems::achievements::check_achievements;
use crate::systems::bounds::check_bridge_bounds;
use crate::systems::feedback::player_feedback;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::hostbridge::{apply_host_commands, forward_host_messages};
use crate::systems::input::drain_input_events;
use crate::systems::jump::{JumpTuning, player_jump, vertical_physics};
use crate::systems::messages::update_messages;
use crate::systems::movement::player_movement;
use crate::systems::score::{track_session_stats, update_score};
use crate::systems::settings::apply_settings_changes;
use crate::systems::time::update_world_time;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build the update schedule: {0}")]
    Schedule(#[from] ScheduleBuildError),
}

/// What a renderer needs to draw the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Vec3,
    pub facing: Facing,
    pub phase: JumpPhase,
    pub moving: bool,
}

impl PlayerView {
    pub fn jumping(&self) -> bool {
        self.phase == JumpPhase::Jumping
    }

    pub fn falling(&self) -> bool {
        self.phase == JumpPhase::Falling
    }
}

// --------------- State hooks ---------------

/// Populate the world: the player entity and the ready notification.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut host: MessageWriter<HostMessage>,
) {
    commands.spawn((
        Player,
        SpawnPoint(Vec3::ZERO),
        WorldPosition::default(),
        Facing::default(),
        JumpBody::new(),
        InputControlled::new(config.move_speed),
        Signals::default(),
    ));
    host.write(HostMessage::GameEvent(GameEvent::GameReady {
        version: GAME_VERSION.to_string(),
    }));
    info!("Setup done");
}

/// Reset the player and counters for a fresh episode.
pub fn start_episode(
    mut player: Query<(&mut WorldPosition, &mut Facing, &mut JumpBody, &SpawnPoint), With<Player>>,
    mut score: ResMut<ScoreState>,
    mut session: ResMut<SessionStats>,
    mut episode: ResMut<Episode>,
    mut input: ResMut<InputState>,
) {
    let Ok(parts) = player.single_mut() else {
        warn!("start_episode: no player entity");
        return;
    };
    reset_run(parts, &mut score, &mut session, &mut episode);
    input.clear_directions();
    info!("Episode {} started", episode.number);
}

/// Close the running episode, if any, and go back to playing.
pub fn restart(
    mut commands: Commands,
    episode: Res<Episode>,
    mut next_state: ResMut<NextGameState>,
) {
    if episode.in_progress {
        commands.trigger(EpisodeEnded {
            reason: EpisodeEndReason::Restarted,
        });
    }
    next_state.set(GameStates::Playing);
    commands.trigger(GameStateChangedEvent {});
}

/// Summarize the running episode before shutting down.
pub fn quit_game(mut commands: Commands, episode: Res<Episode>) {
    if episode.in_progress {
        commands.trigger(EpisodeEnded {
            reason: EpisodeEndReason::Quit,
        });
    }
    info!("Quitting");
}

// --------------- Session ---------------

pub struct GameSession {
    world: World,
    update: Schedule,
    pacer: FramePacer,
    input: InputSender,
    host_tx: Sender<HostInbound>,
    host_rx: Receiver<HostEnvelope>,
}

fn register_hook<M>(
    world: &mut World,
    store: &mut SystemsStore,
    hook: StateHook,
    system: impl IntoSystem<(), (), M> + 'static,
) {
    let id: SystemId = world.register_system(system);
    store.insert(hook, id);
}

fn validate_config(config: &GameConfig) -> Result<(), SessionError> {
    if config.bridge_half_width <= 0.0 {
        return Err(SessionError::InvalidConfig(format!(
            "bridge half width must be positive, got {}",
            config.bridge_half_width
        )));
    }
    if config.bridge_z_min >= config.bridge_z_max {
        return Err(SessionError::InvalidConfig(format!(
            "bridge z range is empty: {}..{}",
            config.bridge_z_min, config.bridge_z_max
        )));
    }
    if config.bridge_z_min > 0.0 || config.bridge_z_max < 0.0 {
        return Err(SessionError::InvalidConfig(
            "the spawn point (z = 0) must lie on the bridge".to_string(),
        ));
    }
    if config.gravity >= 0.0 {
        return Err(SessionError::InvalidConfig(format!(
            "gravity must be negative, got {}",
            config.gravity
        )));
    }
    if config.respawn_depth >= 0.0 {
        return Err(SessionError::InvalidConfig(format!(
            "respawn depth must be below the deck, got {}",
            config.respawn_depth
        )));
    }
    if config.score_multiplier <= 0.0 {
        return Err(SessionError::InvalidConfig(format!(
            "score multiplier must be positive, got {}",
            config.score_multiplier
        )));
    }
    if config.move_speed <= 0.0 {
        return Err(SessionError::InvalidConfig(format!(
            "move speed must be positive, got {}",
            config.move_speed
        )));
    }
    Ok(())
}

/// Load records from `path`, falling back to empty records.
fn load_records(path: Option<&Path>) -> PlayerRecords {
    let Some(path) = path else {
        return PlayerRecords::default();
    };
    if !path.exists() {
        info!("No records at {:?} yet", path);
        return PlayerRecords::default();
    }
    PlayerRecords::load_from_file(path).unwrap_or_else(|e| {
        warn!("{}; starting with empty records", e);
        PlayerRecords::default()
    })
}

impl GameSession {
    /// Build the world, register hooks and observers, run setup and start the
    /// first episode.
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        let records = load_records(config.records_path.as_deref());
        Self::with_records(config, records)
    }

    /// Like [`GameSession::new`] with records supplied by the caller.
    pub fn with_records(config: GameConfig, records: PlayerRecords) -> Result<Self, SessionError> {
        validate_config(&config)?;

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        world.insert_resource(JoystickState::new(
            config.window_width as f32,
            config.window_height as f32,
            config.deadzone_fraction,
            config.max_radius_fraction,
        ));
        world.insert_resource(BridgeGeometry::new(
            config.bridge_half_width,
            config.bridge_z_min,
            config.bridge_z_max,
        ));
        world.insert_resource(JumpTuning {
            impulse: config.jump_impulse,
            gravity: config.gravity,
            respawn_depth: config.respawn_depth,
        });
        world.insert_resource(ScoreState::new(config.score_multiplier));
        world.insert_resource(SessionStats::default());
        world.insert_resource(Episode::default());
        world.insert_resource(records);
        world.insert_resource(Settings::from_config(&config));
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(Messages::<PlayerEvent>::default());
        world.insert_resource(Messages::<AudioCue>::default());

        let (input, receiver) = input_channel();
        world.insert_resource(receiver);
        let endpoints = setup_host_bridge(&mut world);

        let pacer = FramePacer::new(config.frame_skip);
        info!(
            "Starting session: fall policy {}, frame skip {}",
            config.fall_policy, config.frame_skip
        );
        world.insert_resource(config);

        world.spawn(Observer::new(observe_gamestate_change_event));
        world.spawn(Observer::new(observe_episode_ended));

        let mut systems_store = SystemsStore::new();
        register_hook(&mut world, &mut systems_store, StateHook::Setup, setup);
        register_hook(&mut world, &mut systems_store, StateHook::StartEpisode, start_episode);
        register_hook(&mut world, &mut systems_store, StateHook::Restart, restart);
        register_hook(&mut world, &mut systems_store, StateHook::QuitGame, quit_game);
        world.insert_resource(systems_store);
        world.flush();

        let mut update = Schedule::default();
        update.add_systems(
            (
                update_messages::<HostMessage>,
                update_messages::<PlayerEvent>,
                update_messages::<AudioCue>,
                apply_host_commands,
                apply_settings_changes,
                drain_input_events,
                (
                    player_movement,
                    player_jump,
                    vertical_physics,
                    check_bridge_bounds,
                    update_score,
                    track_session_stats,
                    check_achievements,
                )
                    .chain()
                    .run_if(state_is_playing),
                player_feedback,
                check_pending_state,
                forward_host_messages,
            )
                .chain(),
        );
        update.initialize(&mut world)?;

        let mut session = Self {
            world,
            update,
            pacer,
            input,
            host_tx: endpoints.tx_cmd,
            host_rx: endpoints.rx_msg,
        };
        session.request_state(GameStates::Setup);
        session.request_state(GameStates::Playing);
        Ok(session)
    }

    /// Apply a state transition right away, outside of a tick.
    fn request_state(&mut self, state: GameStates) {
        self.world.resource_mut::<NextGameState>().set(state);
        self.world.trigger(GameStateChangedEvent {});
        self.world.flush();
    }

    /// Advance the session by one frame of `dt` seconds.
    ///
    /// Frames held back by the frame-skip policy only accumulate time.
    pub fn tick(&mut self, dt: f32) {
        let Some(delta) = self.pacer.advance(dt) else {
            return;
        };
        update_world_time(&mut self.world, delta);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Summarize the running episode and move to the quitting state. The
    /// resulting host messages are forwarded before this returns.
    pub fn shutdown(&mut self) {
        if self.state() == GameStates::Quitting {
            return;
        }
        self.request_state(GameStates::Quitting);
        // zero-length step: gameplay is gated off, feedback and forwarding run
        update_world_time(&mut self.world, 0.0);
        self.update.run(&mut self.world);
    }

    /// Handle for input producers.
    pub fn input_sender(&self) -> InputSender {
        self.input.clone()
    }

    /// Receiver for everything the session reports to the host.
    pub fn host_messages(&self) -> Receiver<HostEnvelope> {
        self.host_rx.clone()
    }

    /// Sender for host commands; they are applied at the start of the next
    /// tick.
    pub fn host_command_sender(&self) -> Sender<HostInbound> {
        self.host_tx.clone()
    }

    /// Queue a JSON command from the host.
    pub fn send_host_json(&self, text: impl Into<String>) {
        let _ = self.host_tx.send(HostInbound::Json(text.into()));
    }

    /// Queue a typed command.
    pub fn send_host_command(&self, command: HostCommand) {
        let _ = self.host_tx.send(HostInbound::Command(command));
    }

    /// Audio cues produced since the last call.
    pub fn drain_audio_cues(&mut self) -> Vec<AudioCue> {
        self.world
            .resource_mut::<Messages<AudioCue>>()
            .drain()
            .collect()
    }

    pub fn player_view(&mut self) -> Option<PlayerView> {
        let mut query = self
            .world
            .query_filtered::<(&WorldPosition, &Facing, &JumpBody, &Signals), With<Player>>();
        let (position, facing, body, signals) = query.single(&self.world).ok()?;
        Some(PlayerView {
            position: position.pos,
            facing: *facing,
            phase: body.phase(),
            moving: signals.has_flag(MOVING),
        })
    }

    pub fn state(&self) -> GameStates {
        self.world.resource::<GameState>().get()
    }

    pub fn score(&self) -> &ScoreState {
        self.world.resource::<ScoreState>()
    }

    pub fn session_stats(&self) -> &SessionStats {
        self.world.resource::<SessionStats>()
    }

    pub fn records(&self) -> &PlayerRecords {
        self.world.resource::<PlayerRecords>()
    }

    pub fn settings(&self) -> &Settings {
        self.world.resource::<Settings>()
    }

    pub fn joystick(&self) -> &JoystickState {
        self.world.resource::<JoystickState>()
    }

    pub fn bridge(&self) -> &BridgeGeometry {
        self.world.resource::<BridgeGeometry>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
