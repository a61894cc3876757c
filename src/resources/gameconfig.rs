//! Game configuration resource.
//!
//! Manages tuning values loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! frame_skip = 0
//!
//! [gameplay]
//! move_speed = 0.1
//! jump_impulse = 0.15
//! gravity = -0.01
//! respawn_depth = -20
//! score_multiplier = 10
//! fall_policy = respawn
//!
//! [bridge]
//! half_width = 1.5
//! z_min = -35
//! z_max = 15
//!
//! [controls]
//! deadzone_fraction = 0.03
//! max_radius_fraction = 0.06
//! touch_sensitivity = 1.0
//! vibration = true
//! move_speed_multiplier = 1.0
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};

use crate::resources::bridge::{DEFAULT_HALF_WIDTH, DEFAULT_Z_MAX, DEFAULT_Z_MIN};
use crate::resources::joystick::{DEFAULT_DEADZONE_FRACTION, DEFAULT_MAX_RADIUS_FRACTION};
use crate::resources::score::DEFAULT_SCORE_MULTIPLIER;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAME_SKIP: u32 = 0;
pub const DEFAULT_MOVE_SPEED: f32 = 0.1;
pub const DEFAULT_JUMP_IMPULSE: f32 = 0.15;
pub const DEFAULT_GRAVITY: f32 = -0.01;
pub const DEFAULT_RESPAWN_DEPTH: f32 = -20.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// What happens when the player falls below the respawn depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallPolicy {
    /// Put the player back at the spawn point and keep playing.
    #[default]
    Respawn,
    /// Stop in the game-over state until a restart is requested.
    GameOver,
}

impl FromStr for FallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "respawn" => Ok(FallPolicy::Respawn),
            "gameover" | "game_over" | "game-over" => Ok(FallPolicy::GameOver),
            other => Err(format!("Unknown fall policy '{}'", other)),
        }
    }
}

impl fmt::Display for FallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallPolicy::Respawn => write!(f, "respawn"),
            FallPolicy::GameOver => write!(f, "gameover"),
        }
    }
}

/// Game configuration resource.
///
/// Stores window settings, physics tuning, bridge geometry and control
/// defaults. The session reads it once at construction; the settings values
/// in `[controls]` become the initial [`Settings`].
///
/// [`Settings`]: crate::resources::settings::Settings
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Frames skipped between simulation steps; 0 steps every frame.
    pub frame_skip: u32,
    /// Horizontal speed per reference tick.
    pub move_speed: f32,
    /// Vertical velocity given by a jump.
    pub jump_impulse: f32,
    /// Vertical acceleration per reference tick (negative).
    pub gravity: f32,
    /// Height below which a falling player ends the episode.
    pub respawn_depth: f32,
    pub score_multiplier: f32,
    pub fall_policy: FallPolicy,
    pub bridge_half_width: f32,
    pub bridge_z_min: f32,
    pub bridge_z_max: f32,
    pub deadzone_fraction: f32,
    pub max_radius_fraction: f32,
    pub touch_sensitivity: f32,
    pub vibration: bool,
    pub move_speed_multiplier: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
    /// Where to persist player records, if anywhere.
    pub records_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            frame_skip: DEFAULT_FRAME_SKIP,
            move_speed: DEFAULT_MOVE_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            gravity: DEFAULT_GRAVITY,
            respawn_depth: DEFAULT_RESPAWN_DEPTH,
            score_multiplier: DEFAULT_SCORE_MULTIPLIER,
            fall_policy: FallPolicy::default(),
            bridge_half_width: DEFAULT_HALF_WIDTH,
            bridge_z_min: DEFAULT_Z_MIN,
            bridge_z_max: DEFAULT_Z_MAX,
            deadzone_fraction: DEFAULT_DEADZONE_FRACTION,
            max_radius_fraction: DEFAULT_MAX_RADIUS_FRACTION,
            touch_sensitivity: 1.0,
            vibration: true,
            move_speed_multiplier: 1.0,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            records_path: None,
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(skip) = config.getuint("window", "frame_skip").ok().flatten() {
            self.frame_skip = skip as u32;
        }

        // [gameplay] section
        read_f32(config, "gameplay", "move_speed", &mut self.move_speed);
        read_f32(config, "gameplay", "jump_impulse", &mut self.jump_impulse);
        read_f32(config, "gameplay", "gravity", &mut self.gravity);
        read_f32(config, "gameplay", "respawn_depth", &mut self.respawn_depth);
        read_f32(config, "gameplay", "score_multiplier", &mut self.score_multiplier);
        if let Some(policy) = config.get("gameplay", "fall_policy") {
            match policy.parse() {
                Ok(policy) => self.fall_policy = policy,
                Err(e) => warn!("{}; keeping {}", e, self.fall_policy),
            }
        }

        // [bridge] section
        read_f32(config, "bridge", "half_width", &mut self.bridge_half_width);
        read_f32(config, "bridge", "z_min", &mut self.bridge_z_min);
        read_f32(config, "bridge", "z_max", &mut self.bridge_z_max);

        // [controls] section
        read_f32(config, "controls", "deadzone_fraction", &mut self.deadzone_fraction);
        read_f32(config, "controls", "max_radius_fraction", &mut self.max_radius_fraction);
        read_f32(config, "controls", "touch_sensitivity", &mut self.touch_sensitivity);
        read_f32(
            config,
            "controls",
            "move_speed_multiplier",
            &mut self.move_speed_multiplier,
        );
        if let Some(vibration) = config.getbool("controls", "vibration").ok().flatten() {
            self.vibration = vibration;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, frame_skip={}, move_speed={}, jump={}, gravity={}, fall_policy={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.frame_skip,
            self.move_speed,
            self.jump_impulse,
            self.gravity,
            self.fall_policy
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "frame_skip", Some(self.frame_skip.to_string()));

        // [gameplay] section
        config.set("gameplay", "move_speed", Some(self.move_speed.to_string()));
        config.set("gameplay", "jump_impulse", Some(self.jump_impulse.to_string()));
        config.set("gameplay", "gravity", Some(self.gravity.to_string()));
        config.set("gameplay", "respawn_depth", Some(self.respawn_depth.to_string()));
        config.set(
            "gameplay",
            "score_multiplier",
            Some(self.score_multiplier.to_string()),
        );
        config.set("gameplay", "fall_policy", Some(self.fall_policy.to_string()));

        // [bridge] section
        config.set("bridge", "half_width", Some(self.bridge_half_width.to_string()));
        config.set("bridge", "z_min", Some(self.bridge_z_min.to_string()));
        config.set("bridge", "z_max", Some(self.bridge_z_max.to_string()));

        // [controls] section
        config.set(
            "controls",
            "deadzone_fraction",
            Some(self.deadzone_fraction.to_string()),
        );
        config.set(
            "controls",
            "max_radius_fraction",
            Some(self.max_radius_fraction.to_string()),
        );
        config.set(
            "controls",
            "touch_sensitivity",
            Some(self.touch_sensitivity.to_string()),
        );
        config.set("controls", "vibration", Some(self.vibration.to_string()));
        config.set(
            "controls",
            "move_speed_multiplier",
            Some(self.move_speed_multiplier.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    match config.getfloat(section, key) {
        Ok(Some(value)) => *target = value as f32,
        Ok(None) => {}
        Err(e) => warn!("Ignoring [{}] {}: {}", section, key, e),
    }
}
