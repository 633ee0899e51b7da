//! Reference navigable surface: a heightfield of square cells.
//!
//! Each cell is either not navigable or walkable with an area index and a ground height.
//! Agents move between 8-connected neighbors; a step is allowed when the target cell's
//! area passes the query mask and the height change stays within `max_climb`. Diagonal
//! steps additionally require both orthogonal neighbors to be passable (no corner cutting).
//!
//! A grid is immutable while queried. Per-caller search state lives in [`NavGridScratch`].

pub mod bake;
pub mod cell;
pub mod search;

pub use bake::{BakeSettings, GroundDef, GroundShape, GroundWorld};
pub use cell::{CellCoords, CellIndex, CellLayout};
pub use search::SearchPool;

use crate::{
    area::AreaMask,
    constants::{
        AREA_COUNT, DEFAULT_CELL_SIZE, DEFAULT_GRID_SNAP_RADIUS, DEFAULT_MAX_CLIMB,
        DEFAULT_ROUTE_CAPACITY,
    },
    path::NavSurface,
    planar::{from_planar_at, to_planar},
    types::{Vec2, Vec3},
};

/// One grid cell. `area == None` means not navigable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavCell {
    pub area: Option<u8>,
    pub height: f32,
}

impl NavCell {
    pub const BLOCKED: Self = Self {
        area: None,
        height: 0.0,
    };

    pub const fn walkable(area: u8, height: f32) -> Self {
        Self {
            area: Some(area),
            height,
        }
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.area.is_some()
    }

    /// Walkable and in an area allowed by `mask`.
    #[inline]
    pub fn passable(&self, mask: AreaMask) -> bool {
        self.area.is_some_and(|a| mask.allows_area(a))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavGridSettings {
    /// World (X, Z) of the minimum corner of cell `(0, 0)`.
    pub origin: Vec2,
    pub cell_size: f32,
    pub width: u16,
    pub depth: u16,
    /// Largest height difference (meters) allowed between adjacent cells.
    pub max_climb: f32,
    /// Radius (meters) used to place route endpoints onto walkable cells.
    pub snap_radius: f32,
}

impl Default for NavGridSettings {
    fn default() -> Self {
        Self {
            origin: Vec2::new(-32.0, -32.0),
            cell_size: DEFAULT_CELL_SIZE,
            width: 128,
            depth: 128,
            max_climb: DEFAULT_MAX_CLIMB,
            snap_radius: DEFAULT_GRID_SNAP_RADIUS,
        }
    }
}

impl NavGridSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err("Grid origin must be finite");
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err("Cell size must be positive and finite");
        }
        if self.width == 0 || self.depth == 0 {
            return Err("Grid must have at least one cell along each axis");
        }
        if !(self.max_climb >= 0.0) {
            return Err("Max climb must be non-negative");
        }
        if !(self.snap_radius >= 0.0) {
            return Err("Snap radius must be non-negative");
        }
        Ok(())
    }

    pub fn layout(&self) -> CellLayout {
        CellLayout {
            origin: self.origin,
            cell_size: self.cell_size,
            width: self.width,
            depth: self.depth,
        }
    }
}

/// Route working memory for one caller of a [`NavGrid`].
#[derive(Debug)]
pub struct NavGridScratch {
    corners: Vec<Vec3>,
    cells: Vec<CellIndex>,
    pool: SearchPool,
}

impl Default for NavGridScratch {
    fn default() -> Self {
        Self {
            corners: Vec::with_capacity(DEFAULT_ROUTE_CAPACITY),
            cells: Vec::new(),
            pool: SearchPool::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NavGrid {
    settings: NavGridSettings,
    layout: CellLayout,
    cells: Vec<NavCell>,
    area_costs: [f32; AREA_COUNT],
}

impl NavGrid {
    /// Grid with every cell walkable in area 0 at height 0.
    pub fn new(settings: NavGridSettings) -> Result<Self, &'static str> {
        settings.validate()?;
        let layout = settings.layout();
        Ok(Self {
            settings,
            layout,
            cells: vec![NavCell::walkable(0, 0.0); layout.cell_count()],
            area_costs: [1.0; AREA_COUNT],
        })
    }

    pub fn settings(&self) -> &NavGridSettings {
        &self.settings
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn cell(&self, coords: CellCoords) -> Option<NavCell> {
        if !self.layout.contains(coords) {
            return None;
        }
        Some(self.cells[self.layout.encode(coords) as usize])
    }

    pub fn set_cell(&mut self, coords: CellCoords, cell: NavCell) -> Result<(), &'static str> {
        if !self.layout.contains(coords) {
            return Err("Cell coords outside the grid");
        }
        if cell.area.is_some_and(|a| a as usize >= AREA_COUNT) {
            return Err("Area index out of range");
        }
        if !cell.height.is_finite() {
            return Err("Cell height must be finite");
        }
        let index = self.layout.encode(coords) as usize;
        self.cells[index] = cell;
        Ok(())
    }

    /// Set every cell in the inclusive rectangle `min..=max` to `cell`.
    pub fn fill_rect(
        &mut self,
        min: CellCoords,
        max: CellCoords,
        cell: NavCell,
    ) -> Result<(), &'static str> {
        if min.0 > max.0 || min.1 > max.1 {
            return Err("Rectangle min exceeds max");
        }
        if !self.layout.contains(max) {
            return Err("Rectangle extends outside the grid");
        }
        for gx in min.0..=max.0 {
            for gz in min.1..=max.1 {
                self.set_cell((gx, gz), cell)?;
            }
        }
        Ok(())
    }

    /// Mark the inclusive rectangle `min..=max` not navigable.
    pub fn block(&mut self, min: CellCoords, max: CellCoords) -> Result<(), &'static str> {
        self.fill_rect(min, max, NavCell::BLOCKED)
    }

    /// Set the traversal cost multiplier of an area.
    pub fn set_area_cost(&mut self, area: u8, cost: f32) -> Result<(), &'static str> {
        if area as usize >= AREA_COUNT {
            return Err("Area index out of range");
        }
        if !(cost.is_finite() && cost > 0.0) {
            return Err("Area cost must be positive and finite");
        }
        self.area_costs[area as usize] = cost;
        Ok(())
    }

    #[inline]
    pub fn area_cost(&self, area: u8) -> f32 {
        self.area_costs.get(area as usize).copied().unwrap_or(1.0)
    }

    /// World position of the center of a cell at its ground height.
    pub fn cell_center(&self, coords: CellCoords) -> Option<Vec3> {
        let cell = self.cell(coords)?;
        Some(from_planar_at(self.layout.center(coords), cell.height))
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_walkable()).count()
    }

    /// Cheapest cost among the areas allowed by `mask`.
    pub(crate) fn min_area_cost(&self, mask: AreaMask) -> f32 {
        let min = (0..AREA_COUNT as u8)
            .filter(|&a| mask.allows_area(a))
            .map(|a| self.area_costs[a as usize])
            .fold(f32::INFINITY, f32::min);
        if min.is_finite() { min } else { 1.0 }
    }

    /// Neighbor reached by moving `(dx, dz)` from `from`, if the move is allowed.
    pub(crate) fn step(
        &self,
        from: CellCoords,
        dx: i32,
        dz: i32,
        mask: AreaMask,
    ) -> Option<(CellCoords, NavCell)> {
        let here = self.cell(from)?;
        let reachable = |coords: CellCoords| -> Option<NavCell> {
            let cell = self.cell(coords)?;
            let climb = (cell.height - here.height).abs();
            (cell.passable(mask) && climb <= self.settings.max_climb).then_some(cell)
        };

        let next = self.layout.offset(from, dx, dz)?;
        let cell = reachable(next)?;

        if dx != 0 && dz != 0 {
            reachable(self.layout.offset(from, dx, 0)?)?;
            reachable(self.layout.offset(from, 0, dz)?)?;
        }

        Some((next, cell))
    }

    /// Closest point to `point` on a passable cell within `max_radius`, with its cell.
    fn nearest_cell_point(
        &self,
        point: Vec3,
        max_radius: f32,
        mask: AreaMask,
    ) -> Option<(CellIndex, Vec3)> {
        if !(max_radius >= 0.0) || mask.is_empty() {
            return None;
        }

        let p = to_planar(point);
        let layout = &self.layout;
        let max_radius_sq = max_radius * max_radius;

        // Only cells overlapping the search square can qualify.
        let axis_range = |coord: f32, origin: f32, count: u16| -> (u16, u16) {
            if !max_radius.is_finite() {
                return (0, count - 1);
            }
            let last = (count - 1) as f32;
            let lo = ((coord - max_radius - origin) / layout.cell_size)
                .floor()
                .clamp(0.0, last);
            let hi = ((coord + max_radius - origin) / layout.cell_size)
                .floor()
                .clamp(0.0, last);
            (lo as u16, hi as u16)
        };
        let (x_lo, x_hi) = axis_range(p.x, layout.origin.x, layout.width);
        let (z_lo, z_hi) = axis_range(p.y, layout.origin.y, layout.depth);

        let mut best: Option<(CellIndex, Vec3, f32)> = None;
        for gx in x_lo..=x_hi {
            for gz in z_lo..=z_hi {
                let index = layout.encode((gx, gz));
                let cell = self.cells[index as usize];
                if !cell.passable(mask) {
                    continue;
                }

                let candidate = from_planar_at(layout.clamp_into((gx, gz), p), cell.height);
                let d_sq = (candidate - point).norm_squared();
                if d_sq <= max_radius_sq && best.is_none_or(|(_, _, b)| d_sq < b) {
                    best = Some((index, candidate, d_sq));
                }
            }
        }

        best.map(|(index, candidate, _)| (index, candidate))
    }
}

impl NavSurface for NavGrid {
    type Scratch = NavGridScratch;

    fn nearest_point(&self, point: Vec3, max_radius: f32, mask: AreaMask) -> Option<Vec3> {
        self.nearest_cell_point(point, max_radius, mask).map(|(_, p)| p)
    }

    fn compute_route<'s>(
        &self,
        start: Vec3,
        end: Vec3,
        mask: AreaMask,
        scratch: &'s mut NavGridScratch,
    ) -> Option<&'s [Vec3]> {
        let snap = self.settings.snap_radius;
        let (start_cell, start_point) = self.nearest_cell_point(start, snap, mask)?;
        let (end_cell, end_point) = self.nearest_cell_point(end, snap, mask)?;

        if !search::find_cell_path(
            self,
            start_cell,
            end_cell,
            mask,
            &mut scratch.pool,
            &mut scratch.cells,
        ) {
            log::trace!(
                "No cell path from {:?} to {:?}",
                self.layout.decode(start_cell),
                self.layout.decode(end_cell)
            );
            return None;
        }

        search::extract_corners(
            self,
            &scratch.cells,
            start_point,
            end_point,
            mask,
            &mut scratch.corners,
        );
        Some(scratch.corners.as_slice())
    }
}
