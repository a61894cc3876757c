//! Static bridge geometry and the walkable-area predicate.
//!
//! The bridge is an axis-aligned strip centered on `x = 0`, running along the
//! z axis from `z_min` to `z_max`. It is inserted once as a resource and only
//! ever read.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

pub const DEFAULT_HALF_WIDTH: f32 = 1.5;
pub const DEFAULT_Z_MIN: f32 = -35.0;
pub const DEFAULT_Z_MAX: f32 = 15.0;
/// Height above which the player is airborne, not standing on the deck.
pub const GROUND_TOLERANCE: f32 = 0.5;
/// Fraction of the half-width around the centerline that counts as a
/// perfect landing.
pub const PERFECT_LANDING_FRACTION: f32 = 0.3;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BridgeGeometry {
    pub half_width: f32,
    pub z_min: f32,
    pub z_max: f32,
    pub ground_tolerance: f32,
}

impl Default for BridgeGeometry {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            z_min: DEFAULT_Z_MIN,
            z_max: DEFAULT_Z_MAX,
            ground_tolerance: GROUND_TOLERANCE,
        }
    }
}

impl BridgeGeometry {
    pub fn new(half_width: f32, z_min: f32, z_max: f32) -> Self {
        Self {
            half_width,
            z_min,
            z_max,
            ..Self::default()
        }
    }

    /// Whether `(x, z)` lies over the deck, regardless of height.
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x.abs() <= self.half_width && z >= self.z_min && z <= self.z_max
    }

    /// Whether a point is standing on the bridge: over the deck and no higher
    /// than the ground tolerance.
    pub fn is_on_bridge(&self, pos: Vec3) -> bool {
        self.contains_xz(pos.x, pos.z) && pos.y <= self.ground_tolerance
    }

    /// A landing close to the centerline.
    pub fn is_perfect_landing(&self, x: f32) -> bool {
        x.abs() < self.half_width * PERFECT_LANDING_FRACTION
    }

    /// Length of the walkable strip along z.
    pub fn length(&self) -> f32 {
        self.z_max - self.z_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_inclusive() {
        let bridge = BridgeGeometry::default();
        assert!(bridge.is_on_bridge(Vec3::new(1.5, 0.0, 0.0)));
        assert!(bridge.is_on_bridge(Vec3::new(-1.5, 0.0, -35.0)));
        assert!(bridge.is_on_bridge(Vec3::new(0.0, 0.5, 15.0)));
    }

    #[test]
    fn test_outside_any_bound() {
        let bridge = BridgeGeometry::default();
        assert!(!bridge.is_on_bridge(Vec3::new(1.51, 0.0, 0.0)));
        assert!(!bridge.is_on_bridge(Vec3::new(0.0, 0.0, 15.01)));
        assert!(!bridge.is_on_bridge(Vec3::new(0.0, 0.0, -35.01)));
        assert!(!bridge.is_on_bridge(Vec3::new(0.0, 0.51, 0.0)));
    }

    #[test]
    fn test_contains_xz_ignores_height() {
        let bridge = BridgeGeometry::default();
        assert!(bridge.contains_xz(1.0, -10.0));
        assert!(!bridge.is_on_bridge(Vec3::new(1.0, 3.0, -10.0)));
    }

    #[test]
    fn test_perfect_landing_band() {
        let bridge = BridgeGeometry::default();
        assert!(bridge.is_perfect_landing(0.0));
        assert!(bridge.is_perfect_landing(-0.44));
        assert!(!bridge.is_perfect_landing(0.45));
        assert!(!bridge.is_perfect_landing(1.2));
    }
}
