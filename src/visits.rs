//! Sub-cell bookkeeping of where the vehicle has been.
//!
//! The log is a boolean grid `precision` times finer than the world map. It
//! answers "has the vehicle stood here before?" and, for a set of freshly
//! observed terrain points, which share of them lands on ground the vehicle
//! has not visited yet.

use crate::transform::{clip_index, to_sub_cells};
use crate::types::{VehiclePoints, WorldPose};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitLog {
    precision: u32,
    side: usize,
    cells: Vec<bool>,
}

impl VisitLog {
    /// Log covering a `world_size × world_size` map at `precision` sub-cells
    /// per world cell along each axis. `None` when either argument is zero.
    pub fn new(world_size: usize, precision: u32) -> Option<Self> {
        if world_size == 0 || precision == 0 {
            return None;
        }
        let side = world_size.checked_mul(precision as usize)?;
        Some(Self {
            precision,
            side,
            cells: vec![false; side.checked_mul(side)?],
        })
    }

    /// Mark the sub-cell under the vehicle as visited.
    pub fn mark(&mut self, pose: &WorldPose) {
        let i = self.index(self.quantize(pose.x), self.quantize(pose.y));
        self.cells[i] = true;
    }

    /// Whether the sub-cell containing world point (x, y) has been visited.
    pub fn is_visited(&self, x: f32, y: f32) -> bool {
        self.cells[self.index(self.quantize(x), self.quantize(y))]
    }

    /// Number of visited sub-cells.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Share of `points` (vehicle frame, seen from `pose`) that project onto
    /// unvisited sub-cells. `None` for an empty point set.
    pub fn novel_fraction(
        &self,
        points: &VehiclePoints,
        pose: &WorldPose,
        scale: f32,
    ) -> Option<f32> {
        if points.is_empty() {
            return None;
        }
        let cells = to_sub_cells(points, pose, self.side, scale, self.precision as f32);
        let novel = cells
            .iter()
            .filter(|&(qx, qy)| !self.cells[self.index(qx, qy)])
            .count();
        Some(novel as f32 / points.len() as f32)
    }

    /// Sub-cell index of a world coordinate, truncated toward zero.
    fn quantize(&self, v: f32) -> usize {
        clip_index(v * self.precision as f32, self.side)
    }

    fn index(&self, qx: usize, qy: usize) -> usize {
        qy * self.side + qx
    }
}
