//! A* over grid cells and line-of-sight corner extraction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use super::{
    NavGrid,
    cell::{CellCoords, CellIndex},
};
use crate::{area::AreaMask, planar::from_planar_at, types::Vec3};

/// 8-connected neighborhood: (dx, dz, step length in cells).
const NEIGHBORS: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (-1, -1, SQRT_2),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeState {
    New,
    Open,
    Closed,
}

/// Open-list entry. Ordered so that `BinaryHeap` pops the lowest `f` first.
#[derive(Clone, Copy, Debug)]
struct HeapNode {
    index: CellIndex,
    f: f32,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; ties broken on index for determinism.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Reusable node storage for one caller.
///
/// Arrays are sized to the grid on first use. Between searches only the touched nodes
/// are reset.
#[derive(Debug, Default)]
pub struct SearchPool {
    g: Vec<f32>,
    parent: Vec<CellIndex>,
    state: Vec<NodeState>,
    touched: Vec<CellIndex>,
    open: BinaryHeap<HeapNode>,
}

impl SearchPool {
    fn prepare(&mut self, cell_count: usize) {
        if self.state.len() != cell_count {
            self.g = vec![0.0; cell_count];
            self.parent = vec![0; cell_count];
            self.state = vec![NodeState::New; cell_count];
        } else {
            for &i in &self.touched {
                self.state[i as usize] = NodeState::New;
            }
        }
        self.touched.clear();
        self.open.clear();
    }

    fn open_node(&mut self, index: CellIndex, g: f32, parent: CellIndex, f: f32) {
        let i = index as usize;
        if self.state[i] == NodeState::New {
            self.touched.push(index);
        }
        self.g[i] = g;
        self.parent[i] = parent;
        self.state[i] = NodeState::Open;
        self.open.push(HeapNode { index, f });
    }
}

/// Find the cheapest cell path from `start` to `goal` (both inclusive) into `out`.
///
/// Returns false when the goal is unreachable under `mask`.
pub(crate) fn find_cell_path(
    grid: &NavGrid,
    start: CellIndex,
    goal: CellIndex,
    mask: AreaMask,
    pool: &mut SearchPool,
    out: &mut Vec<CellIndex>,
) -> bool {
    out.clear();
    let layout = grid.layout();
    pool.prepare(layout.cell_count());

    let goal_center = layout.center(layout.decode(goal));
    // Admissible as long as every step costs at least its length times the cheapest area.
    let h_scale = grid.min_area_cost(mask);
    let heuristic = |index: CellIndex| -> f32 {
        (layout.center(layout.decode(index)) - goal_center).norm() * h_scale
    };

    pool.open_node(start, 0.0, start, heuristic(start));

    while let Some(HeapNode { index, .. }) = pool.open.pop() {
        let i = index as usize;
        if pool.state[i] == NodeState::Closed {
            continue;
        }
        pool.state[i] = NodeState::Closed;

        if index == goal {
            let mut current = goal;
            out.push(current);
            while current != start {
                current = pool.parent[current as usize];
                out.push(current);
            }
            out.reverse();
            return true;
        }

        let coords = layout.decode(index);
        let g = pool.g[i];

        for &(dx, dz, len) in &NEIGHBORS {
            let Some((next, cell)) = grid.step(coords, dx, dz, mask) else {
                continue;
            };
            let next_index = layout.encode(next);
            let n = next_index as usize;
            if pool.state[n] == NodeState::Closed {
                continue;
            }

            let area = cell.area.unwrap_or_default();
            let next_g = g + len * layout.cell_size * grid.area_cost(area);
            if pool.state[n] == NodeState::New || next_g < pool.g[n] {
                pool.open_node(next_index, next_g, index, next_g + heuristic(next_index));
            }
        }
    }

    false
}

/// Whether an agent can walk the straight grid line from `a` to `b`.
///
/// Walks the 8-connected Bresenham line and applies the same step rule as the search,
/// so a visible pair is always connected in the search graph.
pub(crate) fn line_of_sight(grid: &NavGrid, a: CellCoords, b: CellCoords, mask: AreaMask) -> bool {
    let (mut x, mut z) = (a.0 as i32, a.1 as i32);
    let (x1, z1) = (b.0 as i32, b.1 as i32);

    let dx = (x1 - x).abs();
    let dz = -(z1 - z).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sz = if z < z1 { 1 } else { -1 };
    let mut err = dx + dz;

    while x != x1 || z != z1 {
        let e2 = 2 * err;
        let mut mx = 0;
        let mut mz = 0;
        if e2 >= dz {
            err += dz;
            mx = sx;
        }
        if e2 <= dx {
            err += dx;
            mz = sz;
        }

        if grid.step((x as u16, z as u16), mx, mz, mask).is_none() {
            return false;
        }
        x += mx;
        z += mz;
    }

    true
}

/// Reduce a cell path to corners: `start`, the cells where the line of sight breaks, `end`.
pub(crate) fn extract_corners(
    grid: &NavGrid,
    cells: &[CellIndex],
    start: Vec3,
    end: Vec3,
    mask: AreaMask,
    corners: &mut Vec<Vec3>,
) {
    corners.clear();
    corners.push(start);

    let layout = grid.layout();
    let mut anchor = 0;
    while anchor + 1 < cells.len() {
        let from = layout.decode(cells[anchor]);
        let mut next = anchor + 1;
        for (j, &cell) in cells.iter().enumerate().skip(anchor + 2) {
            if !line_of_sight(grid, from, layout.decode(cell), mask) {
                break;
            }
            next = j;
        }

        if next + 1 < cells.len() {
            let coords = layout.decode(cells[next]);
            let height = grid.cell(coords).map_or(0.0, |c| c.height);
            corners.push(from_planar_at(layout.center(coords), height));
        }
        anchor = next;
    }

    if corners.last() != Some(&end) {
        corners.push(end);
    }
}
