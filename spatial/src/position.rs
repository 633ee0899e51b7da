use nalgebra as na;

use crate::{
    planar::from_planar,
    types::{Iso, Transform, Vec2, Vec3},
};

/// Anything that can report a current world position.
///
/// Every query in this crate takes `impl Position` once instead of carrying a separate
/// overload per input kind. Planar points resolve at height zero. Scene-graph handles
/// should be resolved by the host before they reach a query; implement this trait for the
/// host's node type (or pass its [`Transform`]) to do so.
pub trait Position {
    fn position(&self) -> Vec3;
}

impl Position for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }
}

impl Position for Vec2 {
    #[inline]
    fn position(&self) -> Vec3 {
        from_planar(*self)
    }
}

impl Position for na::Point3<f32> {
    #[inline]
    fn position(&self) -> Vec3 {
        self.coords
    }
}

impl Position for Iso {
    #[inline]
    fn position(&self) -> Vec3 {
        self.translation.vector
    }
}

impl Position for Transform {
    #[inline]
    fn position(&self) -> Vec3 {
        self.translation
    }
}

impl<T: Position + ?Sized> Position for &T {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}
