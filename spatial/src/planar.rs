//! Ground-plane projection.
//!
//! The canonical conversion between 3D world positions and 2D ground-plane points:
//! - `to_planar` drops the vertical axis (index 1).
//! - `from_planar` inserts a vertical coordinate of zero.
//!
//! `to_planar(from_planar(p)) == p` holds for every planar point. The other direction
//! loses height and is not reconstructed.

use crate::types::{Vec2, Vec3};

/// Project a world position onto the ground plane (X/Z).
#[inline]
pub fn to_planar(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Lift a ground-plane point into world space at height zero.
#[inline]
pub fn from_planar(p: Vec2) -> Vec3 {
    from_planar_at(p, 0.0)
}

/// Lift a ground-plane point into world space at `height`.
#[inline]
pub fn from_planar_at(p: Vec2, height: f32) -> Vec3 {
    Vec3::new(p.x, height, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_then_project_is_exact() {
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(-3.25, 7.5),
            Vec2::new(1.0e-7, -1.0e7),
            Vec2::new(f32::MAX, f32::MIN),
        ];

        for p in samples {
            assert_eq!(to_planar(from_planar(p)), p);
        }
    }

    #[test]
    fn project_drops_height_and_is_idempotent() {
        let p = Vec3::new(4.0, 12.5, -2.0);
        let flat = to_planar(p);

        assert_eq!(flat, Vec2::new(4.0, -2.0));
        assert_eq!(to_planar(from_planar(flat)), flat);
        // Height is not reconstructed.
        assert_ne!(from_planar(flat), p);
    }

    #[test]
    fn from_planar_at_places_height_on_y() {
        let p = from_planar_at(Vec2::new(1.0, 2.0), 3.0);
        assert_eq!(p, Vec3::new(1.0, 3.0, 2.0));
    }
}
