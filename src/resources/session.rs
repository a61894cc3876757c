//! Per-episode statistics.
//!
//! [`SessionStats`] counts what happens between a (re)spawn and the end of
//! the episode. When the episode ends it is condensed into a
//! [`SessionSummary`] that feeds the persistent records and the host.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEndReason {
    /// Fell below the respawn depth.
    Fell,
    /// Restarted by the host or the player.
    Restarted,
    /// The session was shut down.
    Quit,
}

/// Episode bookkeeping across respawns and restarts.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Episode {
    /// 1-based index of the current episode, 0 before the first one.
    pub number: u32,
    /// Whether an episode is running and has not been summarized yet.
    pub in_progress: bool,
}

impl Episode {
    pub fn begin(&mut self) {
        self.number += 1;
        self.in_progress = true;
    }

    /// Close the running episode. Returns `false` if none was running.
    pub fn finish(&mut self) -> bool {
        std::mem::replace(&mut self.in_progress, false)
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub jumps: u32,
    pub falls: u32,
    pub perfect_landings: u32,
    /// Seconds spent in the playing state.
    pub play_time_secs: f32,
}

impl SessionStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Condense the stats with the final score values.
    pub fn summary(&self, score: u32, max_distance: f32) -> SessionSummary {
        SessionSummary {
            score,
            max_distance,
            jumps: self.jumps,
            falls: self.falls,
            perfect_landings: self.perfect_landings,
            play_time_secs: self.play_time_secs,
        }
    }
}

/// Snapshot handed to the persistence collaborator at episode end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub score: u32,
    pub max_distance: f32,
    pub jumps: u32,
    pub falls: u32,
    pub perfect_landings: u32,
    pub play_time_secs: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_copies_counters() {
        let stats = SessionStats {
            jumps: 4,
            falls: 1,
            perfect_landings: 2,
            play_time_secs: 12.5,
        };
        let summary = stats.summary(80, 8.0);
        assert_eq!(summary.score, 80);
        assert_eq!(summary.jumps, 4);
        assert_eq!(summary.falls, 1);
        assert_eq!(summary.perfect_landings, 2);
        assert_eq!(summary.play_time_secs, 12.5);
    }

    #[test]
    fn test_episode_finish_once() {
        let mut episode = Episode::default();
        assert!(!episode.finish());
        episode.begin();
        assert_eq!(episode.number, 1);
        assert!(episode.finish());
        assert!(!episode.finish());
    }

    #[test]
    fn test_summary_json_uses_camel_case() {
        let summary = SessionStats::default().summary(10, 1.0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["maxDistance"], 1.0);
        assert_eq!(json["perfectLandings"], 0);
    }
}
