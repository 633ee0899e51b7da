//! Waypoint paths across a navigable surface.
//!
//! [`PathQuery`] wraps a [`NavSurface`] and always produces a usable corner list:
//!
//! 1. Trivial: `start == goal` exactly → `[start]`.
//! 2. Routed: the goal snaps onto the surface and the surface finds a route from `start`
//!    to the snapped goal → the route's corners, in order.
//! 3. Fallback: snapping or routing fails → `[start, goal]`, a straight line that may cross
//!    space the surface considers non-navigable.
//!
//! The query never reports an error and never retries. Each `PathQuery` owns its route
//! scratch buffer, so there is no shared state between callers; give every agent or
//! thread its own instance.

use crate::{
    area::{ALL_AREA_MASK, AreaFilter, AreaMask},
    constants::DEFAULT_SNAP_RADIUS,
    position::Position,
    types::Vec3,
};

/// External navigable-surface service.
pub trait NavSurface {
    /// Per-caller working memory for [`Self::compute_route`].
    type Scratch: Default;

    /// Closest navigable point to `point` within `max_radius` whose area is in `mask`.
    fn nearest_point(&self, point: Vec3, max_radius: f32, mask: AreaMask) -> Option<Vec3>;

    /// Corner sequence from `start` to `end` restricted to `mask`, stored in `scratch`.
    fn compute_route<'s>(
        &self,
        start: Vec3,
        end: Vec3,
        mask: AreaMask,
        scratch: &'s mut Self::Scratch,
    ) -> Option<&'s [Vec3]>;
}

/// Which branch produced a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Start and goal were identical.
    Trivial,
    /// The surface produced a route.
    Routed,
    /// No route; the path is the straight segment from start to goal.
    Fallback,
}

/// Path query configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathQueryConfig {
    /// Areas eligible when the caller does not pass a filter (see [`PathQuery::route_into`]).
    pub area_mask: AreaMask,
    /// Search radius used to snap the goal onto the surface (meters).
    pub snap_radius: f32,
}

impl Default for PathQueryConfig {
    fn default() -> Self {
        Self {
            area_mask: ALL_AREA_MASK,
            snap_radius: DEFAULT_SNAP_RADIUS,
        }
    }
}

impl PathQueryConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.snap_radius.is_nan() {
            return Err("Snap radius is NaN");
        }
        if self.snap_radius < 0.0 {
            return Err("Snap radius is negative");
        }
        if self.area_mask.is_empty() {
            log::warn!("Path query configured with an empty area mask; every route will fall back");
        }
        Ok(())
    }
}

/// An ordered list of world-space corners plus how it was produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    corners: Vec<Vec3>,
    outcome: PathOutcome,
}

impl Path {
    pub fn corners(&self) -> &[Vec3] {
        &self.corners
    }

    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    pub fn outcome(&self) -> PathOutcome {
        self.outcome
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == PathOutcome::Fallback
    }

    /// Sum of segment lengths along the corners (meters).
    pub fn length(&self) -> f32 {
        self.corners.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    pub fn into_corners(self) -> Vec<Vec3> {
        self.corners
    }
}

/// Corners of a single solve, borrowed from the query scratch when routed.
enum Solved<'a> {
    Trivial([Vec3; 1]),
    Routed(&'a [Vec3]),
    Fallback([Vec3; 2]),
}

impl Solved<'_> {
    fn corners(&self) -> &[Vec3] {
        match self {
            Solved::Trivial(c) => c,
            Solved::Routed(c) => c,
            Solved::Fallback(c) => c,
        }
    }

    fn outcome(&self) -> PathOutcome {
        match self {
            Solved::Trivial(_) => PathOutcome::Trivial,
            Solved::Routed(_) => PathOutcome::Routed,
            Solved::Fallback(_) => PathOutcome::Fallback,
        }
    }
}

/// Path query bound to one surface type. Holds the route scratch for one caller.
pub struct PathQuery<S: NavSurface> {
    config: PathQueryConfig,
    scratch: S::Scratch,
}

impl<S: NavSurface> Default for PathQuery<S> {
    fn default() -> Self {
        Self {
            config: PathQueryConfig::default(),
            scratch: S::Scratch::default(),
        }
    }
}

impl<S: NavSurface> PathQuery<S> {
    pub fn new(config: PathQueryConfig) -> Result<Self, &'static str> {
        config.validate()?;
        Ok(Self {
            config,
            scratch: S::Scratch::default(),
        })
    }

    pub fn config(&self) -> &PathQueryConfig {
        &self.config
    }

    /// Compute a path and return it as an owned [`Path`].
    pub fn compute(
        &mut self,
        surface: &S,
        start: impl Position,
        goal: impl Position,
        filter: &impl AreaFilter,
    ) -> Path {
        let solved = self.solve(surface, start.position(), goal.position(), filter.area_mask());
        Path {
            corners: solved.corners().to_vec(),
            outcome: solved.outcome(),
        }
    }

    /// Compute a path into `out`. `out` is cleared first, then receives exactly the corners.
    pub fn compute_into(
        &mut self,
        surface: &S,
        start: impl Position,
        goal: impl Position,
        filter: &impl AreaFilter,
        out: &mut Vec<Vec3>,
    ) -> PathOutcome {
        let solved = self.solve(surface, start.position(), goal.position(), filter.area_mask());
        out.clear();
        out.extend_from_slice(solved.corners());
        solved.outcome()
    }

    /// Compute a path into a fixed array and return the number of corners written.
    ///
    /// Corners beyond `out.len()` are dropped.
    pub fn compute_corners(
        &mut self,
        surface: &S,
        start: impl Position,
        goal: impl Position,
        filter: &impl AreaFilter,
        out: &mut [Vec3],
    ) -> usize {
        let solved = self.solve(surface, start.position(), goal.position(), filter.area_mask());
        let corners = solved.corners();
        let count = corners.len().min(out.len());
        if count < corners.len() {
            log::debug!(
                "Path truncated from {} to {} corners by output buffer",
                corners.len(),
                count
            );
        }
        out[..count].copy_from_slice(&corners[..count]);
        count
    }

    /// [`Self::compute_into`] using the configured default area mask.
    pub fn route_into(
        &mut self,
        surface: &S,
        start: impl Position,
        goal: impl Position,
        out: &mut Vec<Vec3>,
    ) -> PathOutcome {
        let mask = self.config.area_mask;
        self.compute_into(surface, start, goal, &mask, out)
    }

    fn solve(&mut self, surface: &S, start: Vec3, goal: Vec3, mask: AreaMask) -> Solved<'_> {
        if start == goal {
            return Solved::Trivial([start]);
        }

        let Some(snapped_goal) = surface.nearest_point(goal, self.config.snap_radius, mask) else {
            log::debug!("Goal {:?} is off the navigable surface; using straight line", goal);
            return Solved::Fallback([start, goal]);
        };

        match surface.compute_route(start, snapped_goal, mask, &mut self.scratch) {
            Some(corners) if !corners.is_empty() => Solved::Routed(corners),
            _ => {
                log::debug!("No route from {:?} to {:?}; using straight line", start, goal);
                Solved::Fallback([start, goal])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{NavArea, NavQueryFilter};
    use std::cell::{Cell, RefCell};

    /// Surface double that replays a fixed snap and route and records what it was asked.
    #[derive(Default)]
    struct ScriptedSurface {
        snap: Option<Vec3>,
        route: Option<Vec<Vec3>>,
        seen_masks: RefCell<Vec<u32>>,
        seen_radius: Cell<Option<f32>>,
        route_calls: Cell<usize>,
    }

    impl ScriptedSurface {
        fn unreachable() -> Self {
            Self::default()
        }

        fn with_route(route: Vec<Vec3>) -> Self {
            Self {
                snap: route.last().copied(),
                route: Some(route),
                ..Self::default()
            }
        }
    }

    impl NavSurface for ScriptedSurface {
        type Scratch = Vec<Vec3>;

        fn nearest_point(&self, _point: Vec3, max_radius: f32, mask: AreaMask) -> Option<Vec3> {
            self.seen_masks.borrow_mut().push(mask.bits());
            self.seen_radius.set(Some(max_radius));
            self.snap
        }

        fn compute_route<'s>(
            &self,
            _start: Vec3,
            end: Vec3,
            mask: AreaMask,
            scratch: &'s mut Vec<Vec3>,
        ) -> Option<&'s [Vec3]> {
            self.seen_masks.borrow_mut().push(mask.bits());
            self.route_calls.set(self.route_calls.get() + 1);
            let route = self.route.as_ref()?;
            assert_eq!(Some(end), self.snap, "route must target the snapped goal");
            scratch.clear();
            scratch.extend_from_slice(route);
            Some(scratch.as_slice())
        }
    }

    fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }

    #[test]
    fn identical_start_and_goal_is_trivial() {
        let surface = ScriptedSurface::unreachable();
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), &ALL_AREA_MASK);

        assert_eq!(path.corners(), &[v(0.0, 0.0, 0.0)]);
        assert_eq!(path.outcome(), PathOutcome::Trivial);
        // The surface is never consulted.
        assert!(surface.seen_masks.borrow().is_empty());
    }

    #[test]
    fn unreachable_goal_falls_back_to_straight_line() {
        let surface = ScriptedSurface::unreachable();
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), &ALL_AREA_MASK);

        assert_eq!(path.corners(), &[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)]);
        assert!(path.is_fallback());
        assert_eq!(path.length(), 10.0);
        assert_eq!(surface.route_calls.get(), 0);
    }

    #[test]
    fn missing_route_falls_back_with_unsnapped_goal() {
        let surface = ScriptedSurface {
            snap: Some(v(9.5, 0.0, 0.0)),
            route: None,
            ..ScriptedSurface::default()
        };
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), &ALL_AREA_MASK);

        assert_eq!(path.corners(), &[v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0)]);
        assert_eq!(path.outcome(), PathOutcome::Fallback);
        assert_eq!(surface.route_calls.get(), 1);
    }

    #[test]
    fn empty_route_is_treated_as_no_route() {
        let surface = ScriptedSurface {
            snap: Some(v(10.0, 0.0, 0.0)),
            route: Some(Vec::new()),
            ..ScriptedSurface::default()
        };
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), &ALL_AREA_MASK);
        assert!(path.is_fallback());
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn routed_corners_are_returned_in_order() {
        let route = vec![
            v(0.0, 0.0, 0.0),
            v(3.0, 0.0, 1.0),
            v(7.0, 0.0, -1.0),
            v(10.0, 0.0, 0.0),
        ];
        let surface = ScriptedSurface::with_route(route.clone());
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), &ALL_AREA_MASK);

        assert_eq!(path.corners(), route.as_slice());
        assert_eq!(path.outcome(), PathOutcome::Routed);
        // Goal snapping uses the configured unbounded radius.
        assert_eq!(surface.seen_radius.get(), Some(f32::INFINITY));
        assert_eq!(path.into_corners(), route);
    }

    #[test]
    fn routed_path_ends_at_snapped_goal() {
        let route = vec![v(0.0, 0.0, 0.0), v(9.0, 0.5, 0.0)];
        let surface = ScriptedSurface::with_route(route.clone());
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(&surface, v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), &ALL_AREA_MASK);
        assert_eq!(path.corners().last(), Some(&v(9.0, 0.5, 0.0)));
    }

    #[test]
    fn filter_object_and_raw_mask_are_equivalent() {
        let route = vec![v(0.0, 0.0, 0.0), v(2.0, 0.0, 2.0), v(4.0, 0.0, 0.0)];
        let filter = NavQueryFilter::none()
            .with_area(NavArea::Walkable)
            .with_area(NavArea::Jump);
        let mask = AreaMask::new(0b101);

        let by_filter = ScriptedSurface::with_route(route.clone());
        let by_mask = ScriptedSurface::with_route(route);
        let mut query = PathQuery::<ScriptedSurface>::default();

        let a = query.compute(&by_filter, v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0), &filter);
        let b = query.compute(&by_mask, v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0), &mask);

        assert_eq!(a, b);
        assert_eq!(*by_filter.seen_masks.borrow(), vec![0b101, 0b101]);
        assert_eq!(*by_mask.seen_masks.borrow(), vec![0b101, 0b101]);
    }

    #[test]
    fn compute_into_clears_destination_first() {
        let route = vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 1.0), v(2.0, 0.0, 0.0)];
        let surface = ScriptedSurface::with_route(route.clone());
        let mut query = PathQuery::<ScriptedSurface>::default();

        let mut out = vec![v(99.0, 99.0, 99.0); 7];
        let outcome = query.compute_into(
            &surface,
            v(0.0, 0.0, 0.0),
            v(2.0, 0.0, 0.0),
            &ALL_AREA_MASK,
            &mut out,
        );

        assert_eq!(outcome, PathOutcome::Routed);
        assert_eq!(out, route);

        let outcome = query.compute_into(
            &surface,
            v(5.0, 0.0, 5.0),
            v(5.0, 0.0, 5.0),
            &ALL_AREA_MASK,
            &mut out,
        );
        assert_eq!(outcome, PathOutcome::Trivial);
        assert_eq!(out, vec![v(5.0, 0.0, 5.0)]);
    }

    #[test]
    fn compute_corners_reports_count_and_truncates() {
        let route = vec![
            v(0.0, 0.0, 0.0),
            v(3.0, 0.0, 1.0),
            v(7.0, 0.0, -1.0),
            v(10.0, 0.0, 0.0),
        ];
        let surface = ScriptedSurface::with_route(route.clone());
        let mut query = PathQuery::<ScriptedSurface>::default();

        let mut wide = [Vec3::zeros(); 8];
        let n = query.compute_corners(
            &surface,
            v(0.0, 0.0, 0.0),
            v(10.0, 0.0, 0.0),
            &ALL_AREA_MASK,
            &mut wide,
        );
        assert_eq!(n, 4);
        assert_eq!(&wide[..n], route.as_slice());

        let mut narrow = [Vec3::zeros(); 2];
        let n = query.compute_corners(
            &surface,
            v(0.0, 0.0, 0.0),
            v(10.0, 0.0, 0.0),
            &ALL_AREA_MASK,
            &mut narrow,
        );
        assert_eq!(n, 2);
        assert_eq!(&narrow[..], &route[..2]);
    }

    #[test]
    fn route_into_uses_configured_mask() {
        let surface = ScriptedSurface::unreachable();
        let config = PathQueryConfig {
            area_mask: AreaMask::new(0b11),
            snap_radius: 4.0,
        };
        let mut query = PathQuery::<ScriptedSurface>::new(config).unwrap();

        let mut out = Vec::new();
        let outcome = query.route_into(&surface, v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), &mut out);

        assert_eq!(outcome, PathOutcome::Fallback);
        assert_eq!(*surface.seen_masks.borrow(), vec![0b11]);
        assert_eq!(surface.seen_radius.get(), Some(4.0));
    }

    #[test]
    fn planar_inputs_resolve_at_ground_height() {
        use crate::types::Vec2;

        let surface = ScriptedSurface::unreachable();
        let mut query = PathQuery::<ScriptedSurface>::default();

        let path = query.compute(
            &surface,
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 4.0),
            &ALL_AREA_MASK,
        );
        assert_eq!(path.corners(), &[v(1.0, 0.0, 2.0), v(3.0, 0.0, 4.0)]);
    }

    #[test]
    fn config_validation() {
        assert_eq!(PathQueryConfig::default().validate(), Ok(()));

        let bad = PathQueryConfig {
            snap_radius: -1.0,
            ..PathQueryConfig::default()
        };
        assert_eq!(bad.validate(), Err("Snap radius is negative"));
        assert!(PathQuery::<ScriptedSurface>::new(bad).is_err());

        let nan = PathQueryConfig {
            snap_radius: f32::NAN,
            ..PathQueryConfig::default()
        };
        assert_eq!(nan.validate(), Err("Snap radius is NaN"));
    }
}
