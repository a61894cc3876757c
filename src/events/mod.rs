//! Event types and observers.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them.
//!
//! Submodules:
//! - [`audio`] – cues for the sound collaborator
//! - [`episode`] – end-of-episode bookkeeping and the fall policy
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`host`] – messages and commands exchanged with the host shell
//! - [`input`] – raw key, pointer and resize events
//! - [`player`] – player state-change notifications
pub mod audio;
pub mod episode;
pub mod gamestate;
pub mod host;
pub mod input;
pub mod player;
