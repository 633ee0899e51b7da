use crate::{
    constants::{DIST_EPS, YAW_EPS},
    metrics::direction_ground,
    planar::to_planar,
    position::Position,
    types::Vec2,
};

/// Planar velocity of magnitude `speed` pointing from `position` toward `target`.
///
/// If the two positions coincide on the ground plane the direction has zero length and
/// the zero vector is returned instead of a NaN-filled one.
#[inline]
pub fn seek(position: impl Position, speed: f32, target: impl Position) -> Vec2 {
    scaled_direction(direction_ground(target, position), speed)
}

/// Planar velocity of magnitude `speed` pointing away from `threat`.
///
/// Zero when `position` and `threat` coincide on the ground plane.
#[inline]
pub fn flee(position: impl Position, speed: f32, threat: impl Position) -> Vec2 {
    scaled_direction(direction_ground(position, threat), speed)
}

#[inline]
fn scaled_direction(direction: Vec2, speed: f32) -> Vec2 {
    if direction == Vec2::zeros() {
        return Vec2::zeros();
    }

    // Bring the largest component to 1 first so the norm can neither underflow nor overflow.
    let direction = direction / direction.amax();
    direction * (speed / direction.norm())
}

/// Facing yaw (radians about +Y) for a planar direction.
///
/// Uses the `atan2(-x, -z)` convention so that a model authored facing -Z looks along
/// `direction`. Returns `None` when the direction is too short to define a heading.
pub fn yaw_from_planar(direction: Vec2) -> Option<f32> {
    if direction.norm_squared() > YAW_EPS {
        return Some((-direction.x).atan2(-direction.y));
    }

    None
}

/// Result of [`step_toward`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepToward {
    /// Planar translation to apply this tick (meters).
    /// Clamped so the mover never crosses into the acceptance circle.
    pub translation: Vec2,
    /// Whether the mover is on the acceptance circle (or inside it) after this step.
    pub finished: bool,
    /// Planar distance to the target before the step (meters).
    pub distance_to_target: f32,
}

/// Planar translation for one tick toward `target` at `speed` over `dt` seconds,
/// stopping on the boundary of the `acceptance_radius` circle.
///
/// Negative speed, time step or radius are treated as zero.
pub fn step_toward(
    position: impl Position,
    target: impl Position,
    speed: f32,
    dt: f32,
    acceptance_radius: f32,
) -> StepToward {
    let delta = to_planar(target.position()) - to_planar(position.position());
    let dist = delta.norm();

    let acceptance = acceptance_radius.max(0.0);
    let max_step = speed.max(0.0) * dt.max(0.0);

    if dist <= acceptance + DIST_EPS {
        return StepToward {
            translation: Vec2::zeros(),
            finished: true,
            distance_to_target: dist,
        };
    }

    if max_step <= DIST_EPS {
        return StepToward {
            translation: Vec2::zeros(),
            finished: false,
            distance_to_target: dist,
        };
    }

    let to_boundary = dist - acceptance;
    let step = to_boundary.min(max_step);

    StepToward {
        // dist > acceptance >= 0, so the division is safe.
        translation: delta * (step / dist),
        finished: (to_boundary - step).abs() <= DIST_EPS,
        distance_to_target: dist,
    }
}
