//! Agent-centric rewrite of observed positions.
//!
//! A perception consumer usually wants neighbours expressed relative to the observing
//! agent, and often squashed into `[-1, 1]` by a sensing radius. [`normalize_positions`]
//! rewrites a batch in place according to a [`NormalizationMode`].
//!
//! Mixed dimensionality follows two separate policies:
//! - 2D origin against 3D positions: X/Z are shifted by the origin; Y is kept as-is under
//!   `Local` and divided by the same distance under `Normalized`.
//! - 3D origin against 2D positions: positions are shifted by the origin's ground-plane
//!   projection.

use crate::{
    planar::to_planar,
    types::{Vec2, Vec3},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Leave positions untouched.
    #[default]
    None,
    /// Re-center on the origin.
    Local,
    /// Re-center on the origin, divide by the distance and clamp each component to `[-1, 1]`.
    Normalized,
}

/// A position that can be re-expressed relative to an origin of type `O`.
pub trait Relative<O> {
    /// `self - origin`.
    fn localize(&mut self, origin: &O);

    /// `clamp((self - origin) / distance, -1, 1)`, component-wise.
    fn normalize_by(&mut self, origin: &O, distance: f32);
}

impl Relative<Vec2> for Vec2 {
    #[inline]
    fn localize(&mut self, origin: &Vec2) {
        *self -= origin;
    }

    #[inline]
    fn normalize_by(&mut self, origin: &Vec2, distance: f32) {
        *self = ((*self - origin) / distance).map(unit_clamp);
    }
}

impl Relative<Vec3> for Vec3 {
    #[inline]
    fn localize(&mut self, origin: &Vec3) {
        *self -= origin;
    }

    #[inline]
    fn normalize_by(&mut self, origin: &Vec3, distance: f32) {
        *self = ((*self - origin) / distance).map(unit_clamp);
    }
}

impl Relative<Vec2> for Vec3 {
    #[inline]
    fn localize(&mut self, origin: &Vec2) {
        self.x -= origin.x;
        self.z -= origin.y;
    }

    #[inline]
    fn normalize_by(&mut self, origin: &Vec2, distance: f32) {
        self.localize(origin);
        *self = (*self / distance).map(unit_clamp);
    }
}

impl Relative<Vec3> for Vec2 {
    #[inline]
    fn localize(&mut self, origin: &Vec3) {
        *self -= to_planar(*origin);
    }

    #[inline]
    fn normalize_by(&mut self, origin: &Vec3, distance: f32) {
        *self = ((*self - to_planar(*origin)) / distance).map(unit_clamp);
    }
}

#[inline]
fn unit_clamp(v: f32) -> f32 {
    v.clamp(-1.0, 1.0)
}

/// Rewrite `positions` in place relative to `origin`.
///
/// `distance` is only read in [`NormalizationMode::Normalized`] and must be non-zero there.
/// A zero distance is a caller error; it is asserted in debug builds and produces
/// non-finite components in release builds.
pub fn normalize_positions<O, P>(
    origin: &O,
    distance: f32,
    positions: &mut [P],
    mode: NormalizationMode,
) where
    P: Relative<O>,
{
    match mode {
        NormalizationMode::None => {}
        NormalizationMode::Local => positions.iter_mut().for_each(|p| p.localize(origin)),
        NormalizationMode::Normalized => {
            debug_assert!(distance != 0.0, "normalization distance must be non-zero");
            positions
                .iter_mut()
                .for_each(|p| p.normalize_by(origin, distance));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed_3d() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-7.5, 0.25, 12.0),
            Vec3::new(0.1, -0.2, 0.3),
        ]
    }

    #[test]
    fn none_mode_is_bit_identical() {
        let original = vec![
            Vec3::new(0.1, f32::MIN_POSITIVE, -0.0),
            Vec3::new(1.0e9, 3.0, 7.0),
        ];
        let mut positions = original.clone();

        normalize_positions(
            &Vec3::new(5.0, 5.0, 5.0),
            2.0,
            &mut positions,
            NormalizationMode::None,
        );

        for (a, b) in original.iter().zip(&positions) {
            for i in 0..3 {
                assert_eq!(a[i].to_bits(), b[i].to_bits());
            }
        }
    }

    #[test]
    fn local_with_zero_origin_is_unchanged() {
        let original = observed_3d();

        let mut positions = original.clone();
        normalize_positions(&Vec3::zeros(), 1.0, &mut positions, NormalizationMode::Local);
        assert_eq!(positions, original);

        let mut positions = original.clone();
        normalize_positions(&Vec2::zeros(), 1.0, &mut positions, NormalizationMode::Local);
        assert_eq!(positions, original);

        let flat = vec![Vec2::new(1.0, -2.0), Vec2::new(3.5, 4.5)];
        let mut positions = flat.clone();
        normalize_positions(&Vec2::zeros(), 1.0, &mut positions, NormalizationMode::Local);
        assert_eq!(positions, flat);
    }

    #[test]
    fn local_subtracts_origin() {
        let mut positions = vec![Vec3::new(3.0, 4.0, 5.0)];
        normalize_positions(
            &Vec3::new(1.0, 1.0, 1.0),
            0.0,
            &mut positions,
            NormalizationMode::Local,
        );
        assert_eq!(positions[0], Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn normalized_divides_and_clamps() {
        let mut positions = vec![Vec3::new(2.0, 1.0, -1.0), Vec3::new(100.0, -100.0, 0.0)];
        normalize_positions(
            &Vec3::new(1.0, 1.0, 1.0),
            2.0,
            &mut positions,
            NormalizationMode::Normalized,
        );

        assert_eq!(positions[0], Vec3::new(0.5, 0.0, -1.0));
        assert_eq!(positions[1], Vec3::new(1.0, -1.0, -0.5));
    }

    #[test]
    fn planar_origin_keeps_height_under_local() {
        let mut positions = vec![Vec3::new(4.0, 9.0, 6.0)];
        normalize_positions(&Vec2::new(1.0, 2.0), 1.0, &mut positions, NormalizationMode::Local);
        assert_eq!(positions[0], Vec3::new(3.0, 9.0, 4.0));
    }

    #[test]
    fn planar_origin_scales_height_under_normalized() {
        let mut positions = vec![Vec3::new(4.0, 2.0, 6.0), Vec3::new(1.0, 40.0, 2.0)];
        normalize_positions(
            &Vec2::new(1.0, 2.0),
            4.0,
            &mut positions,
            NormalizationMode::Normalized,
        );

        assert_eq!(positions[0], Vec3::new(0.75, 0.5, 1.0));
        assert_eq!(positions[1], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn spatial_origin_against_planar_positions_uses_ground_projection() {
        let origin = Vec3::new(1.0, 50.0, 2.0);

        let mut positions = vec![Vec2::new(3.0, 3.0)];
        normalize_positions(&origin, 1.0, &mut positions, NormalizationMode::Local);
        assert_eq!(positions[0], Vec2::new(2.0, 1.0));

        let mut positions = vec![Vec2::new(3.0, 3.0), Vec2::new(-20.0, 2.0)];
        normalize_positions(&origin, 4.0, &mut positions, NormalizationMode::Normalized);
        assert_eq!(positions[0], Vec2::new(0.5, 0.25));
        assert_eq!(positions[1], Vec2::new(-1.0, 0.0));
    }
}
