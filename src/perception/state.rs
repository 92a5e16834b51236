//! Caller-owned vehicle state threaded through the perception step.

use crate::image::RgbImage;
use crate::types::WorldPose;
use crate::visits::VisitLog;
use crate::worldmap::WorldMap;

/// Everything the perception step reads or writes for one vehicle.
///
/// The caller owns the lifecycle: it refreshes `frame` and `pose` before each
/// step and consumes `vision_image`, `nav_dists` and `nav_angles` after it.
/// `worldmap` and `visits` persist across frames.
#[derive(Clone, Debug)]
pub struct VehicleState {
    /// Latest camera frame.
    pub frame: RgbImage,
    /// Pose at which `frame` was captured.
    pub pose: WorldPose,
    /// Accumulated evidence map.
    pub worldmap: WorldMap,
    /// Display overlay: navigable, rock, obstacle masks in channels 0, 1, 2.
    pub vision_image: RgbImage,
    /// Distances of navigable points from the vehicle.
    pub nav_dists: Vec<f32>,
    /// Bearings of navigable points in (-π, π], parallel to `nav_dists`.
    pub nav_angles: Vec<f32>,
    /// Optional visited-area log.
    pub visits: Option<VisitLog>,
}

impl VehicleState {
    /// Empty state with a `world_size × world_size` map and no frame yet.
    pub fn new(world_size: usize) -> Self {
        Self {
            frame: RgbImage::new(0, 0),
            pose: WorldPose::default(),
            worldmap: WorldMap::new(world_size),
            vision_image: RgbImage::new(0, 0),
            nav_dists: Vec::new(),
            nav_angles: Vec::new(),
            visits: None,
        }
    }

    /// Attach a visited-area log matching the map size. Ignored when
    /// `precision` is zero.
    pub fn with_visit_log(mut self, precision: u32) -> Self {
        self.visits = VisitLog::new(self.worldmap.size(), precision);
        self
    }

    /// Replace the current frame and pose.
    pub fn set_frame(&mut self, frame: RgbImage, pose: WorldPose) {
        self.frame = frame;
        self.pose = pose;
    }
}
