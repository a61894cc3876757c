//! Distance-based score tracking.
//!
//! Distance is measured along z from the point where the current run
//! started. Only a new maximum changes the score, so walking back never takes
//! points away.

use bevy_ecs::prelude::Resource;

pub const DEFAULT_SCORE_MULTIPLIER: f32 = 10.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScoreState {
    /// z coordinate where the run started.
    pub start_z: f32,
    /// Farthest distance reached this run.
    pub max_distance: f32,
    /// `floor(max_distance * multiplier)`.
    pub score: u32,
    pub multiplier: f32,
    /// Best values seen since the process started.
    pub best_distance: f32,
    pub best_score: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_MULTIPLIER)
    }
}

impl ScoreState {
    pub fn new(multiplier: f32) -> Self {
        Self {
            start_z: 0.0,
            max_distance: 0.0,
            score: 0,
            multiplier,
            best_distance: 0.0,
            best_score: 0,
        }
    }

    /// Distance of `z` from the start of the run.
    pub fn distance_from_start(&self, z: f32) -> f32 {
        (z - self.start_z).abs()
    }

    /// Feed the player's current z. Returns `true` if the score changed.
    pub fn update(&mut self, z: f32) -> bool {
        let distance = self.distance_from_start(z);
        if distance <= self.max_distance {
            return false;
        }
        self.max_distance = distance;
        self.best_distance = self.best_distance.max(distance);
        let score = (self.max_distance * self.multiplier).floor() as u32;
        if score == self.score {
            return false;
        }
        self.score = score;
        self.best_score = self.best_score.max(score);
        true
    }

    /// Start a new run at `z`; best values survive.
    pub fn reset(&mut self, z: f32) {
        self.start_z = z;
        self.max_distance = 0.0;
        self.score = 0;
    }
}
