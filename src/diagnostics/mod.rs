//! Structured per-frame report returned by the perception step.
//!
//! The report mirrors what the step wrote into the vehicle state (class pixel
//! counts, navigation summary) plus the rectifying homography and stage
//! timings, and serializes to camelCase JSON.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::angle::mean_bearing_deg;
use crate::types::{PolarPoints, WorldPose};
use nalgebra::Matrix3;
use serde::Serialize;

/// Result of [`Perception::perceive`](crate::Perception::perceive).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionReport {
    pub input: InputDescriptor,
    /// Camera image → rectified image homography.
    pub homography: Matrix3<f64>,
    pub classes: ClassCounts,
    pub navigation: NavigationSummary,
    /// Share of navigable points on not-yet-visited ground, when a visit log
    /// is attached to the state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub novel_fraction: Option<f32>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub world_size: usize,
    pub pose: WorldPose,
}

/// Pixels selected per class in the rectified frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCounts {
    pub navigable: usize,
    pub obstacle: usize,
    pub rock: usize,
}

/// Summary of the polar navigation signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSummary {
    pub points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_dist: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_angle_deg: Option<f32>,
}

impl NavigationSummary {
    pub fn from_polar(polar: &PolarPoints) -> Self {
        let mean_dist = (!polar.is_empty()).then(|| {
            let sum: f64 = polar.dists.iter().map(|&d| d as f64).sum();
            (sum / polar.len() as f64) as f32
        });
        Self {
            points: polar.len(),
            mean_dist,
            mean_angle_deg: mean_bearing_deg(&polar.angles),
        }
    }
}
