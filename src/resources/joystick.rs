//! Virtual joystick state and gesture-to-direction mapping.
//!
//! The on-screen joystick turns a pointer drag into directional intent:
//!
//! 1. A pointer-down inside the hit region activates the stick and binds it
//!    to that pointer's identifier. Any other pointer is ignored until the
//!    bound one is lifted or cancelled.
//! 2. Each move from the bound pointer updates the current coordinate. Only
//!    the latest coordinate is kept, so moves that arrive between ticks
//!    coalesce.
//! 3. [`map_direction`] converts the delta from the center into
//!    [`DirectionFlags`]: nothing inside the dead zone, otherwise one of eight
//!    45° sectors.
//! 4. Release or cancel clears the flags and recenters the knob.
//!
//! All coordinates are viewport pixels with +x to the right and +y down.
//! Radii scale with the shorter viewport side so the stick feels the same on
//! every screen.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::resources::input::DirectionFlags;

/// Dead zone radius as a fraction of the shorter viewport side.
pub const DEFAULT_DEADZONE_FRACTION: f32 = 0.03;
/// Knob travel radius as a fraction of the shorter viewport side.
pub const DEFAULT_MAX_RADIUS_FRACTION: f32 = 0.06;
/// Hit region radius relative to the knob travel radius.
const HIT_RADIUS_FACTOR: f32 = 2.0;
/// Distance of the stick and jump button centers from the screen edges,
/// relative to the knob travel radius.
const EDGE_MARGIN_FACTOR: f32 = 2.5;

/// Identifies the pointer that owns a gesture.
///
/// Mouse input has no identifier and is treated as one implicit pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Circular screen region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Outcome of feeding a pointer event to the joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureUpdate {
    /// The event did not concern the active gesture.
    Ignored,
    /// Gesture started or moved; directions must be re-mapped.
    Moved,
    /// Gesture ended or was cancelled; directions must be cleared.
    Released,
}

/// Resource with the live gesture and the viewport-derived geometry.
#[derive(Resource, Debug, Clone)]
pub struct JoystickState {
    active: bool,
    pointer: Option<PointerId>,
    jump_pointer: Option<PointerId>,
    /// Gesture center, fixed at activation.
    pub center: Vec2,
    /// Latest coordinate of the bound pointer.
    pub current: Vec2,
    /// Activation region around the resting stick.
    pub hit_region: Circle,
    /// Jump button region.
    pub jump_button: Circle,
    /// Maximum knob travel for the visual indicator.
    pub max_radius: f32,
    deadzone_fraction: f32,
    max_radius_fraction: f32,
    sensitivity: f32,
    viewport: Vec2,
}

impl Default for JoystickState {
    fn default() -> Self {
        Self::new(
            800.0,
            600.0,
            DEFAULT_DEADZONE_FRACTION,
            DEFAULT_MAX_RADIUS_FRACTION,
        )
    }
}

impl JoystickState {
    /// Create an inactive joystick laid out for the given viewport.
    pub fn new(
        viewport_w: f32,
        viewport_h: f32,
        deadzone_fraction: f32,
        max_radius_fraction: f32,
    ) -> Self {
        let mut stick = Self {
            active: false,
            pointer: None,
            jump_pointer: None,
            center: Vec2::ZERO,
            current: Vec2::ZERO,
            hit_region: Circle {
                center: Vec2::ZERO,
                radius: 0.0,
            },
            jump_button: Circle {
                center: Vec2::ZERO,
                radius: 0.0,
            },
            max_radius: 0.0,
            deadzone_fraction,
            max_radius_fraction,
            sensitivity: 1.0,
            viewport: Vec2::new(viewport_w, viewport_h),
        };
        stick.layout();
        stick
    }

    fn min_dimension(&self) -> f32 {
        self.viewport.x.min(self.viewport.y)
    }

    fn layout(&mut self) {
        let min_dim = self.min_dimension();
        self.max_radius = min_dim * self.max_radius_fraction;
        let margin = self.max_radius * EDGE_MARGIN_FACTOR;
        self.hit_region = Circle {
            center: Vec2::new(margin, self.viewport.y - margin),
            radius: self.max_radius * HIT_RADIUS_FACTOR,
        };
        self.jump_button = Circle {
            center: Vec2::new(self.viewport.x - margin, self.viewport.y - margin),
            radius: self.max_radius * HIT_RADIUS_FACTOR,
        };
        if !self.active {
            self.center = self.hit_region.center;
            self.current = self.center;
        }
    }

    /// Re-derive radii and regions after a viewport resize.
    ///
    /// An active gesture keeps its center.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.layout();
    }

    /// Touch sensitivity from settings; higher shrinks the dead zone.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity.max(f32::EPSILON);
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Dead zone radius in pixels for the current viewport and sensitivity.
    pub fn deadzone_radius(&self) -> f32 {
        self.min_dimension() * self.deadzone_fraction / self.sensitivity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pointer bound to the active gesture.
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Try to start a gesture at `position`.
    ///
    /// Ignored while another gesture is active (first gesture wins) and when
    /// `position` lies outside the hit region.
    pub fn begin(&mut self, pointer: PointerId, position: Vec2) -> GestureUpdate {
        if self.active || !self.hit_region.contains(position) {
            return GestureUpdate::Ignored;
        }
        self.active = true;
        self.pointer = Some(pointer);
        self.center = self.hit_region.center;
        self.current = position;
        GestureUpdate::Moved
    }

    /// Track a move of `pointer`. Only the bound pointer is accepted.
    pub fn move_to(&mut self, pointer: PointerId, position: Vec2) -> GestureUpdate {
        if !self.active || self.pointer != Some(pointer) {
            return GestureUpdate::Ignored;
        }
        self.current = position;
        GestureUpdate::Moved
    }

    /// End the gesture if `pointer` is the bound one.
    pub fn end(&mut self, pointer: PointerId) -> GestureUpdate {
        if !self.active || self.pointer != Some(pointer) {
            return GestureUpdate::Ignored;
        }
        self.release();
        GestureUpdate::Released
    }

    /// Cancel whatever gesture is active, regardless of pointer.
    pub fn cancel(&mut self) -> GestureUpdate {
        if !self.active {
            return GestureUpdate::Ignored;
        }
        self.release();
        GestureUpdate::Released
    }

    fn release(&mut self) {
        self.active = false;
        self.pointer = None;
        self.center = self.hit_region.center;
        self.current = self.center;
    }

    /// Try to press the jump button with `pointer`. Returns `true` if the
    /// press landed on the button while it was free.
    pub fn press_jump(&mut self, pointer: PointerId, position: Vec2) -> bool {
        if self.jump_pointer.is_some() || !self.jump_button.contains(position) {
            return false;
        }
        self.jump_pointer = Some(pointer);
        true
    }

    /// Release the jump button if `pointer` holds it.
    pub fn release_jump(&mut self, pointer: PointerId) -> bool {
        if self.jump_pointer != Some(pointer) {
            return false;
        }
        self.jump_pointer = None;
        true
    }

    pub fn jump_held(&self) -> bool {
        self.jump_pointer.is_some()
    }

    /// Offset of the knob from the center, clamped to `max_radius`.
    pub fn knob_offset(&self) -> Vec2 {
        if !self.active {
            return Vec2::ZERO;
        }
        (self.current - self.center).clamp_length_max(self.max_radius)
    }

    /// Directional intent of the current gesture.
    pub fn directions(&self) -> DirectionFlags {
        if !self.active {
            return DirectionFlags::NONE;
        }
        map_direction(self.current - self.center, self.deadzone_radius())
    }
}

/// Angle of `delta` in degrees, normalized to `[0, 360)`.
pub fn angle_degrees(delta: Vec2) -> f32 {
    let angle = delta.y.atan2(delta.x).to_degrees();
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Sector index 0..8 for an angle in degrees.
///
/// Sector 0 is centered on 0° (right) and spans [337.5, 360) ∪ [0, 22.5);
/// indices increase clockwise on screen (towards +y, which points down).
pub fn sector_for_angle(angle: f32) -> usize {
    let shifted = (angle + 22.5).rem_euclid(360.0);
    ((shifted / 45.0).floor() as usize) % 8
}

/// Flags for each of the eight sectors.
fn sector_flags(sector: usize) -> DirectionFlags {
    let none = DirectionFlags::NONE;
    match sector {
        0 => DirectionFlags { right: true, ..none },
        1 => DirectionFlags {
            right: true,
            down: true,
            ..none
        },
        2 => DirectionFlags { down: true, ..none },
        3 => DirectionFlags {
            down: true,
            left: true,
            ..none
        },
        4 => DirectionFlags { left: true, ..none },
        5 => DirectionFlags {
            left: true,
            up: true,
            ..none
        },
        6 => DirectionFlags { up: true, ..none },
        _ => DirectionFlags {
            up: true,
            right: true,
            ..none
        },
    }
}

/// Map a joystick delta to directional flags.
///
/// Deltas shorter than `deadzone` produce no movement. The decision uses the
/// raw angle; the magnitude only matters for the dead zone.
pub fn map_direction(delta: Vec2, deadzone: f32) -> DirectionFlags {
    if delta.length() < deadzone {
        return DirectionFlags::NONE;
    }
    sector_flags(sector_for_angle(angle_degrees(delta)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_angle(degrees: f32, distance: f32) -> Vec2 {
        let rad = degrees.to_radians();
        Vec2::new(rad.cos(), rad.sin()) * distance
    }

    #[test]
    fn test_cardinal_and_diagonal_sectors() {
        let flags = map_direction(at_angle(0.0, 40.0), 20.0);
        assert_eq!(
            flags,
            DirectionFlags {
                right: true,
                ..DirectionFlags::NONE
            }
        );
        let flags = map_direction(at_angle(45.0, 40.0), 20.0);
        assert!(flags.right && flags.down && !flags.up && !flags.left);
        let flags = map_direction(at_angle(90.0, 40.0), 20.0);
        assert!(flags.down && !flags.right && !flags.left);
        let flags = map_direction(at_angle(180.0, 40.0), 20.0);
        assert!(flags.left && !flags.up && !flags.down);
        let flags = map_direction(at_angle(270.0, 40.0), 20.0);
        assert!(flags.up && !flags.left && !flags.right);
        let flags = map_direction(at_angle(315.0, 40.0), 20.0);
        assert!(flags.up && flags.right);
    }

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(sector_for_angle(0.0), 0);
        assert_eq!(sector_for_angle(22.4), 0);
        assert_eq!(sector_for_angle(22.5), 1);
        assert_eq!(sector_for_angle(337.4), 7);
        assert_eq!(sector_for_angle(337.5), 0);
        assert_eq!(sector_for_angle(359.9), 0);
        assert_eq!(sector_for_angle(180.0), 4);
    }

    #[test]
    fn test_angle_is_normalized() {
        assert!((angle_degrees(Vec2::new(0.0, -1.0)) - 270.0).abs() < 1e-4);
        assert!((angle_degrees(Vec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
        let a = angle_degrees(Vec2::new(1.0, -1e-9));
        assert!((0.0..360.0).contains(&a));
    }

    #[test]
    fn test_deadzone_clears_everything() {
        for step in 0..16 {
            let flags = map_direction(at_angle(step as f32 * 22.5, 19.9), 20.0);
            assert!(flags.is_none());
        }
        assert!(map_direction(Vec2::ZERO, 20.0).is_none());
    }

    #[test]
    fn test_gesture_scenario_up() {
        // center (100,100), pointer at (100,60), dead zone 20
        let flags = map_direction(Vec2::new(100.0, 60.0) - Vec2::new(100.0, 100.0), 20.0);
        assert_eq!(
            flags,
            DirectionFlags {
                up: true,
                ..DirectionFlags::NONE
            }
        );
    }

    #[test]
    fn test_radii_follow_shorter_viewport_side() {
        let stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        assert!((stick.deadzone_radius() - 15.0).abs() < 1e-4);
        assert!((stick.max_radius - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_sensitivity_shrinks_deadzone() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        stick.set_sensitivity(2.0);
        assert!((stick.deadzone_radius() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_begin_requires_hit_region() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        assert_eq!(
            stick.begin(PointerId::Touch(1), Vec2::new(900.0, 10.0)),
            GestureUpdate::Ignored
        );
        assert!(!stick.is_active());
        let inside = stick.hit_region.center + Vec2::new(5.0, 0.0);
        assert_eq!(stick.begin(PointerId::Touch(1), inside), GestureUpdate::Moved);
        assert!(stick.is_active());
        assert_eq!(stick.pointer(), Some(PointerId::Touch(1)));
    }

    #[test]
    fn test_first_gesture_wins() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        let center = stick.hit_region.center;
        stick.begin(PointerId::Touch(1), center);
        assert_eq!(
            stick.begin(PointerId::Touch(2), center),
            GestureUpdate::Ignored
        );
        assert_eq!(
            stick.move_to(PointerId::Touch(2), center + Vec2::new(50.0, 0.0)),
            GestureUpdate::Ignored
        );
        assert_eq!(stick.current, center);
        assert_eq!(stick.end(PointerId::Touch(2)), GestureUpdate::Ignored);
        assert!(stick.is_active());
    }

    #[test]
    fn test_release_recenters_and_clears() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        let center = stick.hit_region.center;
        stick.begin(PointerId::Mouse, center);
        stick.move_to(PointerId::Mouse, center + Vec2::new(100.0, 0.0));
        assert!(stick.directions().right);
        assert_eq!(stick.knob_offset(), Vec2::new(30.0, 0.0));

        assert_eq!(stick.end(PointerId::Mouse), GestureUpdate::Released);
        assert!(!stick.is_active());
        assert!(stick.directions().is_none());
        assert_eq!(stick.knob_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_button_is_separate_from_stick() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        let button = stick.jump_button.center;
        assert!(!stick.hit_region.contains(button));
        assert_eq!(stick.begin(PointerId::Touch(3), button), GestureUpdate::Ignored);
        assert!(stick.press_jump(PointerId::Touch(3), button));
        assert!(!stick.press_jump(PointerId::Touch(4), button));
        assert!(!stick.release_jump(PointerId::Touch(4)));
        assert!(stick.release_jump(PointerId::Touch(3)));
        assert!(!stick.jump_held());
    }

    #[test]
    fn test_cancel_ignores_pointer() {
        let mut stick = JoystickState::new(1000.0, 500.0, 0.03, 0.06);
        stick.begin(PointerId::Touch(7), stick.hit_region.center);
        assert_eq!(stick.cancel(), GestureUpdate::Released);
        assert_eq!(stick.cancel(), GestureUpdate::Ignored);
    }
}
