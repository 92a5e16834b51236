//! Parameter types configuring the perception stages.
//!
//! Defaults reproduce the reference camera setup: a 320×160 frame, the
//! calibration square from [`DEFAULT_SOURCE_QUAD`], 10 rectified pixels per
//! world cell and the three colour classes from [`crate::segment`].

use crate::homography::Quad;
use crate::rectify::{
    PerspectiveQuads, DEFAULT_BOTTOM_OFFSET, DEFAULT_DST_HALF_SIZE, DEFAULT_SOURCE_QUAD,
};
use crate::segment::{RgbRange, NAVIGABLE_RANGE, OBSTACLE_RANGE, ROCK_RANGE};
use serde::{Deserialize, Serialize};

/// Rectified-image pixels per world-map cell.
pub const DEFAULT_WORLD_SCALE: f32 = 10.0;

/// Top-level parameters of [`Perception`](super::Perception).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionParams {
    /// Colour ranges of the three terrain classes.
    pub classes: ClassRanges,
    /// Bird's-eye rectification setup.
    pub rectify: RectifyParams,
    /// Rectified pixels per world cell (> 0).
    pub scale: f32,
}

impl Default for PerceptionParams {
    fn default() -> Self {
        Self {
            classes: ClassRanges::default(),
            rectify: RectifyParams::default(),
            scale: DEFAULT_WORLD_SCALE,
        }
    }
}

/// Exclusive RGB ranges selecting each terrain class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassRanges {
    pub navigable: RgbRange,
    pub obstacle: RgbRange,
    pub rock: RgbRange,
}

impl Default for ClassRanges {
    fn default() -> Self {
        Self {
            navigable: NAVIGABLE_RANGE,
            obstacle: OBSTACLE_RANGE,
            rock: ROCK_RANGE,
        }
    }
}

/// Perspective rectification parameters.
///
/// - `source_quad`: camera-image corners of the calibration square.
/// - `dst_half_size`: half side of the square in the rectified image.
/// - `bottom_offset`: gap between the square and the last image row.
/// - `fill`: colour used for samples outside the camera frame.
/// - `parallel`: distribute the warp over the rayon pool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyParams {
    pub source_quad: Quad,
    pub dst_half_size: f64,
    pub bottom_offset: f64,
    pub fill: [u8; 3],
    pub parallel: bool,
}

impl Default for RectifyParams {
    fn default() -> Self {
        Self {
            source_quad: DEFAULT_SOURCE_QUAD,
            dst_half_size: DEFAULT_DST_HALF_SIZE,
            bottom_offset: DEFAULT_BOTTOM_OFFSET,
            fill: [0, 0, 0],
            parallel: false,
        }
    }
}

impl RectifyParams {
    /// Quads for a frame of the given size.
    pub fn quads_for(&self, w: usize, h: usize) -> PerspectiveQuads {
        PerspectiveQuads::for_frame(w, h, self.source_quad, self.dst_half_size, self.bottom_offset)
    }
}
