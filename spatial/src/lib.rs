pub mod area;
pub mod bitmask_flags;
pub mod constants;
pub mod grid;
pub mod metrics;
pub mod normalize;
pub mod path;
pub mod planar;
pub mod position;
pub mod steering;
pub mod types;

pub use area::{ALL_AREA_MASK, AreaFilter, AreaMask, NavArea, NavQueryFilter};
pub use constants::{ALL_AREAS, DEFAULT_SNAP_RADIUS, DIST_EPS, YAW_EPS};
pub use grid::{
    BakeSettings, GroundDef, GroundShape, GroundWorld, NavCell, NavGrid, NavGridScratch,
    NavGridSettings,
};
pub use metrics::{
    beyond_full, beyond_ground, direction_full, direction_ground, distance_full,
    distance_full_sq, distance_ground, distance_ground_sq, within_full, within_ground,
};
pub use normalize::{NormalizationMode, Relative, normalize_positions};
pub use path::{NavSurface, Path, PathOutcome, PathQuery, PathQueryConfig};
pub use planar::{from_planar, from_planar_at, to_planar};
pub use position::Position;
pub use steering::{StepToward, flee, seek, step_toward, yaw_from_planar};
pub use types::{Iso, Quat, Transform, Vec2, Vec3};
