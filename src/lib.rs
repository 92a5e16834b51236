#![doc = include_str!("../README.md")]

// Pipeline stages, leaf first.
pub mod coords;
pub mod homography;
pub mod image;
pub mod rectify;
pub mod segment;
pub mod transform;
pub mod worldmap;

// Orchestration and supporting types.
pub mod angle;
pub mod config;
pub mod diagnostics;
pub mod perception;
pub mod types;
pub mod visits;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the perception step and the state it mutates.
pub use crate::perception::{Perception, PerceptionError, PerceptionParams, VehicleState};
pub use crate::types::{PolarPoints, VehiclePoints, WorldCells, WorldPose};
pub use crate::worldmap::{MapChannel, WorldMap};

// Per-frame report.
pub use crate::diagnostics::PerceptionReport;

// Stage functions usable on their own.
pub use crate::coords::{to_polar, to_vehicle_frame};
pub use crate::rectify::{rectify, PerspectiveQuads};
pub use crate::segment::{segment, RgbRange};
pub use crate::transform::{to_sub_cells, to_world, to_world_float};
pub use crate::worldmap::accumulate;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rover_perception::prelude::*;
///
/// # fn main() {
/// let frame = RgbImage::filled(320, 160, [200, 200, 200]);
/// let mut state = VehicleState::new(200);
/// state.set_frame(frame, WorldPose::new(100.0, 100.0, 0.0));
///
/// let mut perception = Perception::new(PerceptionParams::default());
/// let report = perception.perceive(&mut state).expect("valid frame");
/// println!("navigable={} nav_points={}", report.classes.navigable, state.nav_angles.len());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RgbImage;
    pub use crate::{MapChannel, Perception, PerceptionParams, VehicleState, WorldPose};
}
