//! Achievement checks that can fire in the middle of an episode.
//!
//! `NO_FALL_RUN` is decided when an episode ends, see
//! [`crate::events::episode`].
use bevy_ecs::prelude::*;
use log::info;

use crate::events::host::HostMessage;
use crate::resources::records::{
    Achievement, DISTANCE_ACHIEVEMENTS, JUMP_MASTER_JUMPS, MARATHON_SECS, PERFECT_LANDINGS_TARGET,
    PlayerRecords, SCORE_ACHIEVEMENTS,
};
use crate::resources::score::ScoreState;
use crate::resources::session::SessionStats;

/// Achievements earned by the given score and session.
pub fn earned(score: &ScoreState, session: &SessionStats) -> Vec<Achievement> {
    let mut earned: Vec<Achievement> = SCORE_ACHIEVEMENTS
        .iter()
        .filter(|(threshold, _)| score.score >= *threshold)
        .map(|(_, a)| *a)
        .collect();
    earned.extend(
        DISTANCE_ACHIEVEMENTS
            .iter()
            .filter(|(threshold, _)| score.max_distance >= *threshold)
            .map(|(_, a)| *a),
    );
    if session.jumps >= JUMP_MASTER_JUMPS {
        earned.push(Achievement::JumpMaster);
    }
    if session.perfect_landings >= PERFECT_LANDINGS_TARGET {
        earned.push(Achievement::PerfectLanding10);
    }
    if session.play_time_secs > MARATHON_SECS {
        earned.push(Achievement::MarathonPlayer);
    }
    earned
}

/// Unlock newly earned achievements and announce them to the host.
pub fn check_achievements(
    score: Res<ScoreState>,
    session: Res<SessionStats>,
    mut records: ResMut<PlayerRecords>,
    mut host: MessageWriter<HostMessage>,
) {
    if !score.is_changed() && !session.is_changed() {
        return;
    }
    for achievement in earned(&score, &session) {
        if records.has(achievement) {
            continue;
        }
        records.unlock(achievement);
        info!("Achievement unlocked: {}", achievement.id());
        host.write(HostMessage::Achievement {
            achievement_id: achievement.id().to_string(),
            score: Some(score.score),
            distance: Some(score.max_distance),
        });
    }
}
