//! Stepping Stone game core.
//!
//! This module exposes the game's ECS components, resources, systems, and
//! events, and the [`game::GameSession`] driver that ties them together, for
//! use by frontends, hosts and integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
