//! Persistent player records and achievements.
//!
//! Records outlive episodes and, when a records path is configured, the
//! process: they are stored as a small JSON document.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

use crate::resources::session::SessionSummary;

/// One-time unlockable achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Achievement {
    #[serde(rename = "SCORE_100")]
    Score100,
    #[serde(rename = "SCORE_500")]
    Score500,
    #[serde(rename = "SCORE_1000")]
    Score1000,
    #[serde(rename = "SCORE_5000")]
    Score5000,
    #[serde(rename = "SCORE_10000")]
    Score10000,
    #[serde(rename = "DISTANCE_10")]
    Distance10,
    #[serde(rename = "DISTANCE_50")]
    Distance50,
    #[serde(rename = "DISTANCE_100")]
    Distance100,
    #[serde(rename = "DISTANCE_500")]
    Distance500,
    #[serde(rename = "DISTANCE_1000")]
    Distance1000,
    JumpMaster,
    #[serde(rename = "PERFECT_LANDING_10")]
    PerfectLanding10,
    NoFallRun,
    MarathonPlayer,
}

pub const SCORE_ACHIEVEMENTS: [(u32, Achievement); 5] = [
    (100, Achievement::Score100),
    (500, Achievement::Score500),
    (1000, Achievement::Score1000),
    (5000, Achievement::Score5000),
    (10000, Achievement::Score10000),
];

pub const DISTANCE_ACHIEVEMENTS: [(f32, Achievement); 5] = [
    (10.0, Achievement::Distance10),
    (50.0, Achievement::Distance50),
    (100.0, Achievement::Distance100),
    (500.0, Achievement::Distance500),
    (1000.0, Achievement::Distance1000),
];

pub const JUMP_MASTER_JUMPS: u32 = 100;
pub const PERFECT_LANDINGS_TARGET: u32 = 10;
pub const NO_FALL_MIN_DISTANCE: f32 = 10.0;
pub const MARATHON_SECS: f32 = 300.0;

impl Achievement {
    /// Identifier used on the host protocol and in the records file.
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::Score100 => "SCORE_100",
            Achievement::Score500 => "SCORE_500",
            Achievement::Score1000 => "SCORE_1000",
            Achievement::Score5000 => "SCORE_5000",
            Achievement::Score10000 => "SCORE_10000",
            Achievement::Distance10 => "DISTANCE_10",
            Achievement::Distance50 => "DISTANCE_50",
            Achievement::Distance100 => "DISTANCE_100",
            Achievement::Distance500 => "DISTANCE_500",
            Achievement::Distance1000 => "DISTANCE_1000",
            Achievement::JumpMaster => "JUMP_MASTER",
            Achievement::PerfectLanding10 => "PERFECT_LANDING_10",
            Achievement::NoFallRun => "NO_FALL_RUN",
            Achievement::MarathonPlayer => "MARATHON_PLAYER",
        }
    }
}

/// Which bests an episode beat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub new_best_score: bool,
    pub new_best_distance: bool,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerRecords {
    pub best_score: u32,
    pub best_distance: f32,
    pub total_games: u32,
    pub total_jumps: u32,
    pub total_falls: u32,
    pub total_play_time_secs: f32,
    pub average_score: f32,
    pub longest_session_secs: f32,
    pub achievements: BTreeSet<Achievement>,
}

impl PlayerRecords {
    /// Read records from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read records file {:?}: {}", path, e))?;
        let records: PlayerRecords = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse records file {:?}: {}", path, e))?;
        info!(
            "Loaded records: best score {}, {} games, {} achievements",
            records.best_score,
            records.total_games,
            records.achievements.len()
        );
        Ok(records)
    }

    /// Write records as pretty JSON, replacing the file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize records: {}", e))?;
        fs::write(path, text)
            .map_err(|e| format!("Failed to write records file {:?}: {}", path, e))?;
        info!("Saved records to {:?}", path);
        Ok(())
    }

    pub fn has(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Unlock an achievement. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        self.achievements.insert(achievement)
    }

    /// Fold a finished episode into the totals and bests.
    pub fn record_episode(&mut self, summary: &SessionSummary) -> RecordUpdate {
        let mut update = RecordUpdate::default();
        if summary.score > self.best_score {
            self.best_score = summary.score;
            update.new_best_score = true;
        }
        if summary.max_distance > self.best_distance {
            self.best_distance = summary.max_distance;
            update.new_best_distance = true;
        }

        self.total_games += 1;
        self.total_jumps += summary.jumps;
        self.total_falls += summary.falls;
        self.total_play_time_secs += summary.play_time_secs;
        let games = self.total_games as f32;
        self.average_score = (self.average_score * (games - 1.0) + summary.score as f32) / games;
        self.longest_session_secs = self.longest_session_secs.max(summary.play_time_secs);
        update
    }

    /// Forget everything, achievements included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u32, distance: f32, secs: f32) -> SessionSummary {
        SessionSummary {
            score,
            max_distance: distance,
            jumps: 3,
            falls: 1,
            perfect_landings: 1,
            play_time_secs: secs,
        }
    }

    #[test]
    fn test_record_episode_tracks_bests_and_average() {
        let mut records = PlayerRecords::default();
        let update = records.record_episode(&summary(100, 10.0, 20.0));
        assert!(update.new_best_score && update.new_best_distance);

        let update = records.record_episode(&summary(50, 5.0, 40.0));
        assert_eq!(update, RecordUpdate::default());
        assert_eq!(records.best_score, 100);
        assert_eq!(records.total_games, 2);
        assert_eq!(records.total_jumps, 6);
        assert_eq!(records.total_falls, 2);
        assert!((records.average_score - 75.0).abs() < 1e-4);
        assert_eq!(records.longest_session_secs, 40.0);
        assert_eq!(records.total_play_time_secs, 60.0);
    }

    #[test]
    fn test_unlock_is_once() {
        let mut records = PlayerRecords::default();
        assert!(records.unlock(Achievement::JumpMaster));
        assert!(!records.unlock(Achievement::JumpMaster));
        assert!(records.has(Achievement::JumpMaster));
    }

    #[test]
    fn test_achievement_ids_match_serde_names() {
        for achievement in [
            Achievement::Score100,
            Achievement::Distance1000,
            Achievement::JumpMaster,
            Achievement::PerfectLanding10,
            Achievement::NoFallRun,
            Achievement::MarathonPlayer,
        ] {
            let json = serde_json::to_string(&achievement).unwrap();
            assert_eq!(json, format!("\"{}\"", achievement.id()));
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "steppingstone_records_{}.json",
            std::process::id()
        ));
        let mut records = PlayerRecords::default();
        records.record_episode(&summary(230, 23.0, 31.0));
        records.unlock(Achievement::Score100);
        records.save_to_file(&path).unwrap();

        let loaded = PlayerRecords::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = std::env::temp_dir().join("steppingstone_definitely_missing.json");
        assert!(PlayerRecords::load_from_file(&path).is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let records: PlayerRecords = serde_json::from_str(r#"{"bestScore": 7}"#).unwrap();
        assert_eq!(records.best_score, 7);
        assert!(records.achievements.is_empty());
    }
}
