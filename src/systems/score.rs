//! Score and session statistics.
use bevy_ecs::prelude::*;

use crate::components::player::Player;
use crate::components::position::WorldPosition;
use crate::events::host::HostMessage;
use crate::events::player::PlayerEvent;
use crate::resources::score::ScoreState;
use crate::resources::session::SessionStats;
use crate::resources::worldtime::WorldTime;

/// Feed the player's z into the score and report changes to the host.
pub fn update_score(
    query: Query<&WorldPosition, With<Player>>,
    mut score: ResMut<ScoreState>,
    mut host: MessageWriter<HostMessage>,
) {
    let Ok(position) = query.single() else {
        return;
    };
    if score.update(position.pos.z) {
        host.write(HostMessage::Score {
            score: score.score,
            distance: score.max_distance,
        });
    }
}

/// Count jumps, falls and perfect landings, and accumulate play time.
pub fn track_session_stats(
    time: Res<WorldTime>,
    mut reader: MessageReader<PlayerEvent>,
    mut session: ResMut<SessionStats>,
) {
    session.play_time_secs += time.delta;
    for event in reader.read() {
        match event {
            PlayerEvent::Jumped { .. } => session.jumps += 1,
            PlayerEvent::FallStarted { .. } => session.falls += 1,
            PlayerEvent::Landed { perfect: true, .. } => session.perfect_landings += 1,
            _ => {}
        }
    }
}
