//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `bridge` – static bridge geometry and the walkable-area predicate
//! - `gameconfig` – INI-backed tuning and the fall policy
//! - `gamestate` – authoritative and pending high-level game state
//! - `hostbridge` – channels to and from the host shell
//! - `input` – per-tick directional flags and the jump action
//! - `inputchannel` – channel carrying raw input events into the session
//! - `joystick` – virtual joystick gesture and direction mapping
//! - `records` – persistent bests, totals and achievements
//! - `score` – distance-based score of the current run
//! - `session` – per-episode counters and episode bookkeeping
//! - `settings` – player-adjustable settings with validation
//! - `systemsstore` – registry of state hook systems by name
//! - `worldtime` – simulation time, delta and frame pacing
pub mod bridge;
pub mod gameconfig;
pub mod gamestate;
pub mod hostbridge;
pub mod input;
pub mod inputchannel;
pub mod joystick;
pub mod records;
pub mod score;
pub mod session;
pub mod settings;
pub mod systemsstore;
pub mod worldtime;
