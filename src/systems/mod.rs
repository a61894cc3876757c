//! Game systems.
//!
//! This module groups all ECS systems that advance the simulation.
//!
//! Submodules overview
//! - [`achievements`] – unlock achievements as thresholds are crossed
//! - [`bounds`] – force a fall when the player leaves the bridge
//! - [`feedback`] – audio cues, haptics and host notifications
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`hostbridge`] – apply host commands and forward host messages
//! - [`input`] – drain input events into [`crate::resources::input::InputState`]
//! - [`jump`] – jump start, gravity, tumble, landing and deep falls
//! - [`messages`] – advance ECS message queues
//! - [`movement`] – horizontal movement and heading
//! - [`score`] – score updates and session statistics
//! - [`settings`] – propagate settings changes
//! - [`time`] – update simulation time and delta

pub mod achievements;
pub mod bounds;
pub mod feedback;
pub mod gamestate;
pub mod hostbridge;
pub mod input;
pub mod jump;
pub mod messages;
pub mod movement;
pub mod score;
pub mod settings;
pub mod time;
