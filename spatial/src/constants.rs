/// Area mask selecting every navigable area.
///
/// This is the default filter for path queries when the caller does not narrow it.
pub const ALL_AREAS: u32 = u32::MAX;

/// Number of distinct area indices an [`crate::AreaMask`] can address.
pub const AREA_COUNT: usize = 32;

/// Default search radius (meters) used to snap a goal onto the navigable surface.
///
/// Unbounded: any walkable point is accepted, however far it is.
pub const DEFAULT_SNAP_RADIUS: f32 = f32::INFINITY;

/// Initial capacity of a route corner buffer.
pub const DEFAULT_ROUTE_CAPACITY: usize = 32;

/// Minimum planar direction length required to derive a facing yaw.
pub const YAW_EPS: f32 = 1.0e-6;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// Default size of one navigation grid cell in world units (meters).
/// All cells are square.
pub const DEFAULT_CELL_SIZE: f32 = 0.5;

/// Default largest height difference (meters) an agent may step between adjacent cells.
pub const DEFAULT_MAX_CLIMB: f32 = 0.35;

/// Default radius (meters) used by the grid to place route endpoints onto walkable cells.
pub const DEFAULT_GRID_SNAP_RADIUS: f32 = 2.0;

/// Cosine of the steepest walkable ground slope (about 50 degrees).
///
/// A ground hit is walkable when `normal.y >= DEFAULT_MAX_SLOPE_COS`.
pub const DEFAULT_MAX_SLOPE_COS: f32 = 0.64;
