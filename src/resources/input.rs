//! Per-frame directional input resource.
//!
//! Captures the four movement directions and the jump action in the
//! [`InputState`] resource. Both input surfaces write here: keyboard events
//! set single flags, the virtual joystick overwrites all four at once with a
//! [`DirectionFlags`] value. Movement logic never knows which one was used.

use bevy_ecs::prelude::*;

/// Logical keys the core understands. Frontends map physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Jump,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state with edge detection.
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action was pressed since the last tick.
    pub just_pressed: bool,
    /// Whether the action was released since the last tick.
    pub just_released: bool,
}

impl BoolState {
    /// Apply a new held value, recording the edge if it changed.
    pub fn set(&mut self, active: bool) {
        if active && !self.active {
            self.just_pressed = true;
        } else if !active && self.active {
            self.just_released = true;
        }
        self.active = active;
    }

    /// Forget the edges; called once per tick after consumers ran.
    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Combination of directional intents produced by the joystick mapper.
///
/// Any combination is valid; diagonals set two orthogonal flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    pub const NONE: DirectionFlags = DirectionFlags {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn is_none(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Resource capturing the directional intent and the jump action.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
}

impl InputState {
    /// Set the held value of a single key.
    pub fn set_key(&mut self, key: GameKey, active: bool) {
        match key {
            GameKey::Up => self.up.set(active),
            GameKey::Down => self.down.set(active),
            GameKey::Left => self.left.set(active),
            GameKey::Right => self.right.set(active),
            GameKey::Jump => self.jump.set(active),
        }
    }

    /// Overwrite all four directions at once.
    pub fn set_directions(&mut self, flags: DirectionFlags) {
        self.up.set(flags.up);
        self.down.set(flags.down);
        self.left.set(flags.left);
        self.right.set(flags.right);
    }

    /// Release all four directions.
    pub fn clear_directions(&mut self) {
        self.set_directions(DirectionFlags::NONE);
    }

    /// Snapshot of the held directions.
    pub fn directions(&self) -> DirectionFlags {
        DirectionFlags {
            up: self.up.active,
            down: self.down.active,
            left: self.left.active,
            right: self.right.active,
        }
    }

    /// Drop every edge flag.
    pub fn clear_edges(&mut self) {
        self.up.clear_edges();
        self.down.clear_edges();
        self.left.clear_edges();
        self.right.clear_edges();
        self.jump.clear_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert!(input.directions().is_none());
        assert!(!input.jump.active);
    }

    #[test]
    fn test_set_key_records_edges() {
        let mut input = InputState::default();
        input.set_key(GameKey::Jump, true);
        assert!(input.jump.active);
        assert!(input.jump.just_pressed);

        input.clear_edges();
        input.set_key(GameKey::Jump, true);
        assert!(!input.jump.just_pressed, "holding is not a new press");

        input.set_key(GameKey::Jump, false);
        assert!(input.jump.just_released);
        assert!(!input.jump.active);
    }

    #[test]
    fn test_set_directions_overwrites_all_four() {
        let mut input = InputState::default();
        input.set_key(GameKey::Left, true);
        input.set_directions(DirectionFlags {
            right: true,
            down: true,
            ..DirectionFlags::NONE
        });
        let dirs = input.directions();
        assert!(dirs.right && dirs.down);
        assert!(!dirs.left && !dirs.up);
        assert!(input.left.just_released);
    }

    #[test]
    fn test_clear_directions_keeps_jump() {
        let mut input = InputState::default();
        input.set_key(GameKey::Up, true);
        input.set_key(GameKey::Jump, true);
        input.clear_directions();
        assert!(input.directions().is_none());
        assert!(input.jump.active);
    }
}
