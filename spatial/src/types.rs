/*!
Math aliases and the world pose type shared by every query module.

Conventions
- Units are meters.
- +Y is up. The ground plane is X/Z.
- A planar `Vec2` stores world X in `.x` and world Z in `.y`.
*/

use nalgebra as na;

pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World-space pose of a scene-graph node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::zeros())
    }
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(na::Translation3::from(self.translation), self.rotation)
    }
}

impl From<Iso> for Transform {
    fn from(iso: Iso) -> Self {
        Self::new(iso.translation.vector, iso.rotation)
    }
}
