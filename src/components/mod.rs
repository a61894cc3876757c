//! ECS components for entities.
//!
//! The game world holds a single player entity; these components split its
//! state into the pieces each system needs.
//!
//! Submodules overview:
//! - [`inputcontrolled`] – movement speed for an input-driven entity
//! - [`jumpbody`] – vertical velocity and the grounded/jumping/falling phase
//! - [`player`] – player marker and spawn point
//! - [`position`] – world-space position
//! - [`rotation`] – heading and tumble angles
//! - [`signals`] – per-entity flags and scalars read by renderers

pub mod inputcontrolled;
pub mod jumpbody;
pub mod player;
pub mod position;
pub mod rotation;
pub mod signals;
