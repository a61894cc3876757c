//! Vertical body of the player: jump phase and vertical velocity.
//!
//! The [`JumpBody`] component holds the state of the jump/fall state machine.
//! The phase is a single enum, so a body can never be jumping and falling at
//! the same time.
//!
//! # Phases
//!
//! - [`JumpPhase::Grounded`] – standing or walking on the bridge, `y == 0`
//! - [`JumpPhase::Jumping`] – airborne after a jump command
//! - [`JumpPhase::Falling`] – walked off the edge, or came down outside the
//!   bridge; tumbles until landing or respawn
//!
//! Transitions are driven by [`crate::systems::jump`] and
//! [`crate::systems::bounds`].

use bevy_ecs::prelude::Component;

/// Discrete vertical state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Jumping,
    Falling,
}

/// Vertical velocity plus the current [`JumpPhase`].
///
/// Velocity is expressed in world units per reference tick (1/60 s); the
/// physics system scales it by the frame delta.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct JumpBody {
    /// Vertical velocity, positive is up.
    pub velocity: f32,
    phase: JumpPhase,
}

impl JumpBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn is_jumping(&self) -> bool {
        self.phase == JumpPhase::Jumping
    }

    pub fn is_falling(&self) -> bool {
        self.phase == JumpPhase::Falling
    }

    pub fn is_grounded(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }

    /// Start a jump with the given impulse.
    ///
    /// Only allowed when neither jumping nor falling. Returns `true` if the
    /// jump started.
    pub fn start_jump(&mut self, impulse: f32) -> bool {
        if self.phase != JumpPhase::Grounded {
            return false;
        }
        self.phase = JumpPhase::Jumping;
        self.velocity = impulse;
        true
    }

    /// Switch to [`JumpPhase::Falling`], keeping the current velocity.
    ///
    /// Works from any phase except `Falling` itself. Returns `true` if the
    /// phase changed.
    pub fn force_fall(&mut self) -> bool {
        if self.phase == JumpPhase::Falling {
            return false;
        }
        self.phase = JumpPhase::Falling;
        true
    }

    /// Touch down: back to grounded with zero velocity.
    pub fn land(&mut self) {
        self.phase = JumpPhase::Grounded;
        self.velocity = 0.0;
    }

    /// Same as [`land`](Self::land); used on respawn where no landing happened.
    pub fn reset(&mut self) {
        self.land();
    }
}
