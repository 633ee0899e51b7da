//! Baking a [`NavGrid`] from static ground geometry.
//!
//! Ground is described as a list of [`GroundDef`]s and loaded into a Rapier query world.
//! Baking casts one ray straight down through every cell center:
//! - a hit whose normal is steep (`normal.y < max_slope_cos`) leaves the cell not navigable;
//! - any other hit makes the cell walkable at the hit height, in the hit collider's area;
//! - no hit within `ray_length` leaves the cell not navigable.
//!
//! The query world is deterministic: defs are inserted sorted by `id`.

use rapier3d::na::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

use super::{NavCell, NavGrid, NavGridSettings};
use crate::{
    constants::{AREA_COUNT, DEFAULT_MAX_SLOPE_COS},
    types::{Quat, Vec3},
};

/// Supported ground shapes. All dimensions in meters.
#[derive(Clone, Debug, PartialEq)]
pub enum GroundShape {
    /// Infinite plane. Its normal is `rotation * +Y` and it passes through
    /// `translation + normal * offset_along_normal`.
    Plane { offset_along_normal: f32 },
    Cuboid { half_extents: Vec3 },
    CylinderY { radius: f32, half_height: f32 },
    Sphere { radius: f32 },
}

/// One immutable piece of ground.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundDef {
    /// Stable identifier; insertion order is ascending `id`.
    pub id: u32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: GroundShape,
    /// Area index assigned to cells baked on this ground.
    pub area: u8,
}

impl GroundDef {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.translation.iter().all(|c| c.is_finite()) {
            return Err("Ground translation must be finite");
        }
        if !self.rotation.coords.iter().all(|c| c.is_finite()) {
            return Err("Ground rotation must be finite");
        }
        if self.area as usize >= AREA_COUNT {
            return Err("Ground area index out of range");
        }

        let positive = |v: f32| v.is_finite() && v > 0.0;
        let shape_ok = match &self.shape {
            GroundShape::Plane {
                offset_along_normal,
            } => offset_along_normal.is_finite(),
            GroundShape::Cuboid { half_extents } => half_extents.iter().all(|&c| positive(c)),
            GroundShape::CylinderY {
                radius,
                half_height,
            } => positive(*radius) && positive(*half_height),
            GroundShape::Sphere { radius } => positive(*radius),
        };
        if !shape_ok {
            return Err("Ground shape dimensions must be positive and finite");
        }

        Ok(())
    }

    fn collider(&self) -> Collider {
        let builder = match &self.shape {
            // Local half-space facing +Y; the parent pose supplies rotation and translation.
            GroundShape::Plane {
                offset_along_normal,
            } => ColliderBuilder::halfspace(Vector3::y_axis())
                .translation(Vector3::new(0.0, *offset_along_normal, 0.0)),
            GroundShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            GroundShape::CylinderY {
                radius,
                half_height,
            } => ColliderBuilder::cylinder(*half_height, *radius),
            GroundShape::Sphere { radius } => ColliderBuilder::ball(*radius),
        };

        builder.user_data(self.area as u128).build()
    }

    fn pose(&self) -> Isometry3<f32> {
        let t = self.translation;
        let q = self.rotation;
        Isometry3::from_parts(
            Translation3::new(t.x, t.y, t.z),
            UnitQuaternion::new_normalize(Quaternion::new(q.w, q.i, q.j, q.k)),
        )
    }
}

/// Rapier scene holding static ground, ready for ray queries.
pub struct GroundWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl GroundWorld {
    pub fn build(mut defs: Vec<GroundDef>) -> Result<Self, &'static str> {
        for def in &defs {
            def.validate()?;
        }
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        for def in &defs {
            let body = bodies.insert(RigidBodyBuilder::fixed().pose(def.pose()).build());
            colliders.insert_with_parent(def.collider(), body, &mut bodies);
        }

        // Collision detection only; refreshes the BVH so queries see every collider.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        CollisionPipeline::new().step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        log::debug!("Ground world built with {} colliders", colliders.len());

        Ok(Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        })
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Borrowed query view over the ground.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// First ground hit straight below `(x, top, z)` within `length`: `(height, normal_y, area)`.
    fn probe_down(
        &self,
        pipeline: &QueryPipeline<'_>,
        x: f32,
        top: f32,
        z: f32,
        length: f32,
    ) -> Option<(f32, f32, Option<u8>)> {
        let ray = Ray::new(Point3::new(x, top, z), Vector3::new(0.0, -1.0, 0.0));
        let (handle, hit) = pipeline.cast_ray_and_get_normal(&ray, length, true)?;
        let area = self
            .colliders
            .get(handle)
            .and_then(|c| u8::try_from(c.user_data).ok())
            .filter(|&a| (a as usize) < AREA_COUNT);
        Some((top - hit.time_of_impact, hit.normal.y, area))
    }
}

/// Ray parameters for [`NavGrid::bake`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BakeSettings {
    /// Height rays start from (meters). Ground above it is not seen.
    pub ray_top: f32,
    /// Maximum ray travel downwards (meters).
    pub ray_length: f32,
    /// A hit is walkable when its normal Y is at least this.
    pub max_slope_cos: f32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            ray_top: 100.0,
            ray_length: 200.0,
            max_slope_cos: DEFAULT_MAX_SLOPE_COS,
        }
    }
}

impl BakeSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.ray_top.is_finite() {
            return Err("Ray top must be finite");
        }
        if !(self.ray_length.is_finite() && self.ray_length > 0.0) {
            return Err("Ray length must be positive and finite");
        }
        if !(-1.0..=1.0).contains(&self.max_slope_cos) {
            return Err("Max slope cosine must be within [-1, 1]");
        }
        Ok(())
    }
}

impl NavGrid {
    /// Build a grid whose cells follow the walkable ground of `world`.
    pub fn bake(
        settings: NavGridSettings,
        world: &GroundWorld,
        bake: &BakeSettings,
    ) -> Result<NavGrid, &'static str> {
        bake.validate()?;
        let mut grid = NavGrid::new(settings)?;
        let layout = *grid.layout();
        let pipeline = world.query_pipeline(QueryFilter::default());

        let mut steep = 0usize;
        let mut missing = 0usize;
        for gx in 0..layout.width {
            for gz in 0..layout.depth {
                let center = layout.center((gx, gz));
                let probe =
                    world.probe_down(&pipeline, center.x, bake.ray_top, center.y, bake.ray_length);

                let cell = match probe {
                    Some((height, normal_y, Some(area))) if normal_y >= bake.max_slope_cos => {
                        NavCell::walkable(area, height)
                    }
                    Some(_) => {
                        steep += 1;
                        NavCell::BLOCKED
                    }
                    None => {
                        missing += 1;
                        NavCell::BLOCKED
                    }
                };
                grid.set_cell((gx, gz), cell)?;
            }
        }

        log::info!(
            "Baked nav grid {}x{}: {} walkable, {} steep, {} without ground",
            layout.width,
            layout.depth,
            grid.walkable_count(),
            steep,
            missing
        );

        Ok(grid)
    }
}
