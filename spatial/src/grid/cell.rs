//! Cell layout of a navigation grid.
//!
//! # Model
//! - The grid is `width x depth` square cells of side `cell_size` meters.
//! - `origin` is the world (X, Z) position of the minimum corner of cell `(0, 0)`.
//! - Cell `(gx, gz)` covers `[origin.x + gx * cell_size, origin.x + (gx + 1) * cell_size)`
//!   along X and the same along Z.
//!
//! # Encoding
//! Grid coords are linearized in X-major order: `index = gx * depth + gz`.
//! World positions outside the grid have no cell.

use crate::types::Vec2;

/// Linear index of a cell.
pub type CellIndex = u32;

/// Grid coordinates `(gx, gz)` of a cell.
pub type CellCoords = (u16, u16);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    pub origin: Vec2,
    pub cell_size: f32,
    pub width: u16,
    pub depth: u16,
}

impl CellLayout {
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    #[inline]
    pub fn contains(&self, (gx, gz): CellCoords) -> bool {
        gx < self.width && gz < self.depth
    }

    #[inline]
    pub fn encode(&self, (gx, gz): CellCoords) -> CellIndex {
        gx as CellIndex * self.depth as CellIndex + gz as CellIndex
    }

    #[inline]
    pub fn decode(&self, index: CellIndex) -> CellCoords {
        let depth = self.depth as CellIndex;
        ((index / depth) as u16, (index % depth) as u16)
    }

    /// Cell containing the planar point `p`, if any.
    #[inline]
    pub fn cell_at(&self, p: Vec2) -> Option<CellCoords> {
        let inv = 1.0 / self.cell_size;
        let gx = ((p.x - self.origin.x) * inv).floor();
        let gz = ((p.y - self.origin.y) * inv).floor();

        if !(gx >= 0.0 && gz >= 0.0 && gx < self.width as f32 && gz < self.depth as f32) {
            return None;
        }

        Some((gx as u16, gz as u16))
    }

    /// Planar position of the minimum corner of a cell.
    #[inline]
    pub fn min_corner(&self, (gx, gz): CellCoords) -> Vec2 {
        Vec2::new(
            self.origin.x + gx as f32 * self.cell_size,
            self.origin.y + gz as f32 * self.cell_size,
        )
    }

    /// Planar position of the center of a cell.
    #[inline]
    pub fn center(&self, coords: CellCoords) -> Vec2 {
        self.min_corner(coords) + Vec2::repeat(self.cell_size * 0.5)
    }

    /// Closest point to `p` within the square of a cell.
    #[inline]
    pub fn clamp_into(&self, coords: CellCoords, p: Vec2) -> Vec2 {
        let min = self.min_corner(coords);
        let max = min + Vec2::repeat(self.cell_size);
        Vec2::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y))
    }

    /// Neighbor of `coords` offset by `(dx, dz)`, if it lies inside the grid.
    #[inline]
    pub fn offset(&self, (gx, gz): CellCoords, dx: i32, dz: i32) -> Option<CellCoords> {
        let nx = gx as i32 + dx;
        let nz = gz as i32 + dz;
        if nx < 0 || nz < 0 || nx >= self.width as i32 || nz >= self.depth as i32 {
            return None;
        }
        Some((nx as u16, nz as u16))
    }
}
