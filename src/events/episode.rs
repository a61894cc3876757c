//! End-of-episode event and its bookkeeping.
//!
//! An episode is the run between a (re)spawn and the moment the player falls
//! below the respawn depth, restarts, or quits. Whatever the cause, the same
//! observer summarizes it: records are updated, the host receives
//! `session_data` and `statistics`, and the records file is saved. After a
//! fall, the configured [`FallPolicy`] decides whether the player is put back
//! on the bridge right away or the game stops in [`GameStates::GameOver`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::jumpbody::JumpBody;
use crate::components::player::{Player, SpawnPoint};
use crate::components::position::WorldPosition;
use crate::components::rotation::Facing;
use crate::events::host::HostMessage;
use crate::events::player::PlayerEvent;
use crate::resources::gameconfig::{FallPolicy, GameConfig};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::records::{Achievement, NO_FALL_MIN_DISTANCE, PlayerRecords};
use crate::resources::score::ScoreState;
use crate::resources::session::{Episode, EpisodeEndReason, SessionStats};

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeEnded {
    pub reason: EpisodeEndReason,
}

/// Put the player back at its spawn point and open a fresh episode.
///
/// Position, facing and vertical state are reset; the score restarts from the
/// spawn z and session counters go back to zero.
pub fn reset_run(
    (mut position, mut facing, mut body, spawn): (
        Mut<WorldPosition>,
        Mut<Facing>,
        Mut<JumpBody>,
        &SpawnPoint,
    ),
    score: &mut ScoreState,
    session: &mut SessionStats,
    episode: &mut Episode,
) {
    position.pos = spawn.0;
    facing.reset();
    body.reset();
    score.reset(spawn.0.z);
    session.reset();
    episode.begin();
}

/// Summarize the finished episode and apply the fall policy.
#[allow(clippy::too_many_arguments)]
pub fn observe_episode_ended(
    trigger: On<EpisodeEnded>,
    config: Res<GameConfig>,
    mut score: ResMut<ScoreState>,
    mut session: ResMut<SessionStats>,
    mut records: ResMut<PlayerRecords>,
    mut episode: ResMut<Episode>,
    mut next_state: ResMut<NextGameState>,
    mut player: Query<(&mut WorldPosition, &mut Facing, &mut JumpBody, &SpawnPoint), With<Player>>,
    mut host: MessageWriter<HostMessage>,
    mut player_events: MessageWriter<PlayerEvent>,
) {
    let reason = trigger.event().reason;
    if !episode.finish() {
        return;
    }

    let summary = session.summary(score.score, score.max_distance);
    info!(
        "Episode {} ended ({:?}): score {}, distance {:.2}, jumps {}, falls {}",
        episode.number, reason, summary.score, summary.max_distance, summary.jumps, summary.falls
    );

    let update = records.record_episode(&summary);
    if update.new_best_score {
        host.write(HostMessage::Achievement {
            achievement_id: "NEW_HIGH_SCORE".to_string(),
            score: Some(records.best_score),
            distance: None,
        });
    }
    if update.new_best_distance {
        host.write(HostMessage::Achievement {
            achievement_id: "NEW_DISTANCE_RECORD".to_string(),
            score: None,
            distance: Some(records.best_distance),
        });
    }
    // only a run that was not cut short by a fall counts
    if reason != EpisodeEndReason::Fell
        && summary.falls == 0
        && summary.max_distance > NO_FALL_MIN_DISTANCE
        && records.unlock(Achievement::NoFallRun)
    {
        host.write(HostMessage::Achievement {
            achievement_id: Achievement::NoFallRun.id().to_string(),
            score: None,
            distance: Some(summary.max_distance),
        });
    }
    host.write(HostMessage::SessionData(summary));
    host.write(HostMessage::Statistics(records.clone()));

    if let Some(path) = config.records_path.as_deref()
        && let Err(e) = records.save_to_file(path)
    {
        warn!("{}", e);
    }

    if reason != EpisodeEndReason::Fell {
        return;
    }
    match config.fall_policy {
        FallPolicy::Respawn => {
            let Ok((position, facing, body, spawn)) = player.single_mut() else {
                return;
            };
            reset_run(
                (position, facing, body, spawn),
                &mut score,
                &mut session,
                &mut episode,
            );
            player_events.write(PlayerEvent::Respawned { position: spawn.0 });
        }
        FallPolicy::GameOver => next_state.set(GameStates::GameOver),
    }
}
