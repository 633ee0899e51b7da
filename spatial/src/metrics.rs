//! Distance, containment and direction queries.
//!
//! Each query comes in a ground-plane form (operands projected to X/Z first) and a
//! full-space form (all three axes). All of them are pure and total.
//!
//! `within_*` and `beyond_*` are both inclusive at the boundary, so at exactly
//! `distance == r` both report true. They are not logical complements.

use crate::{
    planar::to_planar,
    position::Position,
    types::{Vec2, Vec3},
};

/// Planar (XZ) distance squared between two positions (meters^2).
#[inline]
pub fn distance_ground_sq(a: impl Position, b: impl Position) -> f32 {
    direction_ground(a, b).norm_squared()
}

/// Planar (XZ) distance between two positions (meters).
#[inline]
pub fn distance_ground(a: impl Position, b: impl Position) -> f32 {
    direction_ground(a, b).norm()
}

/// Full 3D distance squared between two positions (meters^2).
#[inline]
pub fn distance_full_sq(a: impl Position, b: impl Position) -> f32 {
    direction_full(a, b).norm_squared()
}

/// Full 3D distance between two positions (meters).
#[inline]
pub fn distance_full(a: impl Position, b: impl Position) -> f32 {
    direction_full(a, b).norm()
}

/// Is `a` within `r` meters of `b` on the ground plane? Inclusive.
#[inline]
pub fn within_ground(a: impl Position, b: impl Position, r: f32) -> bool {
    distance_ground(a, b) <= r
}

/// Is `a` at least `r` meters from `b` on the ground plane? Inclusive.
#[inline]
pub fn beyond_ground(a: impl Position, b: impl Position, r: f32) -> bool {
    distance_ground(a, b) >= r
}

/// Is `a` within `r` meters of `b` in 3D? Inclusive.
#[inline]
pub fn within_full(a: impl Position, b: impl Position, r: f32) -> bool {
    distance_full(a, b) <= r
}

/// Is `a` at least `r` meters from `b` in 3D? Inclusive.
#[inline]
pub fn beyond_full(a: impl Position, b: impl Position, r: f32) -> bool {
    distance_full(a, b) >= r
}

/// Unnormalized 3D direction from `b` toward `a` (`a - b`).
#[inline]
pub fn direction_full(a: impl Position, b: impl Position) -> Vec3 {
    a.position() - b.position()
}

/// Unnormalized planar direction from `b` toward `a`.
#[inline]
pub fn direction_ground(a: impl Position, b: impl Position) -> Vec2 {
    to_planar(a.position()) - to_planar(b.position())
}
