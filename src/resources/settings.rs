//! Player-adjustable settings.
//!
//! [`Settings`] is the live copy the systems read. Updates arrive as a partial
//! [`SettingsUpdate`] (from the host or the config file) and are validated as
//! a whole before anything is applied, so a bad value never leaves the
//! settings half-updated.

use std::ops::RangeInclusive;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::gameconfig::GameConfig;

pub const MOVE_SPEED_MULTIPLIER_RANGE: RangeInclusive<f32> = 0.25..=3.0;
pub const TOUCH_SENSITIVITY_RANGE: RangeInclusive<f32> = 0.1..=3.0;
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{key} = {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub move_speed_multiplier: f32,
    pub touch_sensitivity: f32,
    pub vibration: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_speed_multiplier: 1.0,
            touch_sensitivity: 1.0,
            vibration: true,
            music_volume: 0.7,
            sfx_volume: 0.8,
        }
    }
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_speed_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_sensitivity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx_volume: Option<f32>,
}

fn check(
    key: &'static str,
    value: Option<f32>,
    range: RangeInclusive<f32>,
) -> Result<(), SettingsError> {
    match value {
        Some(v) if !range.contains(&v) => Err(SettingsError::OutOfRange {
            key,
            value: v,
            min: *range.start(),
            max: *range.end(),
        }),
        _ => Ok(()),
    }
}

impl SettingsUpdate {
    /// Reject the whole update if any present value is out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check(
            "moveSpeedMultiplier",
            self.move_speed_multiplier,
            MOVE_SPEED_MULTIPLIER_RANGE,
        )?;
        check(
            "touchSensitivity",
            self.touch_sensitivity,
            TOUCH_SENSITIVITY_RANGE,
        )?;
        check("musicVolume", self.music_volume, VOLUME_RANGE)?;
        check("sfxVolume", self.sfx_volume, VOLUME_RANGE)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Initial settings from the `[controls]` section, clamped into range.
    pub fn from_config(config: &GameConfig) -> Self {
        let clamp = |v: f32, r: RangeInclusive<f32>| v.clamp(*r.start(), *r.end());
        Self {
            move_speed_multiplier: clamp(config.move_speed_multiplier, MOVE_SPEED_MULTIPLIER_RANGE),
            touch_sensitivity: clamp(config.touch_sensitivity, TOUCH_SENSITIVITY_RANGE),
            vibration: config.vibration,
            ..Self::default()
        }
    }

    /// Validate and apply a partial update.
    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<(), SettingsError> {
        update.validate()?;
        if let Some(v) = update.move_speed_multiplier {
            self.move_speed_multiplier = v;
        }
        if let Some(v) = update.touch_sensitivity {
            self.touch_sensitivity = v;
        }
        if let Some(v) = update.vibration {
            self.vibration = v;
        }
        if let Some(v) = update.music_volume {
            self.music_volume = v;
        }
        if let Some(v) = update.sfx_volume {
            self.sfx_volume = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            touch_sensitivity: Some(2.0),
            vibration: Some(false),
            ..Default::default()
        };
        settings.apply(&update).unwrap();
        assert_eq!(settings.touch_sensitivity, 2.0);
        assert!(!settings.vibration);
        assert_eq!(settings.move_speed_multiplier, 1.0);
    }

    #[test]
    fn test_out_of_range_rejects_whole_update() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            vibration: Some(false),
            touch_sensitivity: Some(5.0),
            ..Default::default()
        };
        let err = settings.apply(&update).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                key: "touchSensitivity",
                ..
            }
        ));
        assert!(settings.vibration, "nothing applied");
    }

    #[test]
    fn test_from_config_clamps() {
        let mut config = GameConfig::new();
        config.touch_sensitivity = 9.0;
        config.move_speed_multiplier = 0.0;
        let settings = Settings::from_config(&config);
        assert_eq!(settings.touch_sensitivity, 3.0);
        assert_eq!(settings.move_speed_multiplier, 0.25);
    }

    #[test]
    fn test_update_deserializes_camel_case() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"moveSpeedMultiplier": 1.5, "sfxVolume": 0.2}"#).unwrap();
        assert_eq!(update.move_speed_multiplier, Some(1.5));
        assert_eq!(update.sfx_volume, Some(0.2));
        assert!(update.touch_sensitivity.is_none());
        assert!(!update.is_empty());
    }
}
