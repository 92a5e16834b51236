//! Per-frame perception step.
//!
//! [`Perception::perceive`] turns the frame stored in a [`VehicleState`] into
//! map evidence and a navigation signal:
//! 1. rectify the frame into a bird's-eye view,
//! 2. segment navigable, obstacle and rock pixels,
//! 3. overwrite the vision overlay with the three masks,
//! 4. convert each mask into vehicle-frame points,
//! 5. project the points into the world grid and add them to the map,
//! 6. store the polar form of the navigable points as the navigation signal,
//! 7. when a visit log is attached, measure how much of the navigable ground
//!    is unvisited and mark the current pose.
//!
//! Typical usage:
//! ```no_run
//! use rover_perception::{Perception, PerceptionParams, VehicleState, WorldPose};
//! use rover_perception::image::RgbImage;
//!
//! # fn example(frame: RgbImage) {
//! let mut perception = Perception::new(PerceptionParams::default());
//! let mut state = VehicleState::new(200);
//! state.set_frame(frame, WorldPose::new(99.7, 85.6, 56.8));
//! match perception.perceive(&mut state) {
//!     Ok(report) => println!("navigable pixels: {}", report.classes.navigable),
//!     Err(err) => eprintln!("frame skipped: {err}"),
//! }
//! # }
//! ```
use super::error::PerceptionError;
use super::params::PerceptionParams;
use super::state::VehicleState;
use super::workspace::{Homographies, RectifierWorkspace};
use crate::coords::{to_polar, to_vehicle_frame};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    ClassCounts, InputDescriptor, NavigationSummary, PerceptionReport, TimingBreakdown,
};
use crate::image::{BinaryMask, ImageView, RgbImage};
use crate::rectify::rectify_with;
use crate::segment::segment;
use crate::transform::to_world;
use crate::worldmap::{accumulate, MapChannel};
use log::{debug, warn};
use std::time::Instant;

/// Perception step with its parameters and cached rectification matrices.
pub struct Perception {
    params: PerceptionParams,
    workspace: RectifierWorkspace,
}

/// Binary masks of the three terrain classes for one rectified frame.
#[derive(Clone, Debug)]
pub struct ClassMasks {
    pub navigable: BinaryMask,
    pub obstacle: BinaryMask,
    pub rock: BinaryMask,
}

impl Perception {
    pub fn new(params: PerceptionParams) -> Self {
        Self {
            params,
            workspace: RectifierWorkspace::new(),
        }
    }

    pub fn params(&self) -> &PerceptionParams {
        &self.params
    }

    /// Replace the parameters, dropping cached homographies.
    pub fn set_params(&mut self, params: PerceptionParams) {
        self.params = params;
        self.workspace.reset();
    }

    /// Warp a camera frame into the bird's-eye view.
    pub fn rectify_frame(&mut self, frame: &RgbImage) -> Result<RgbImage, PerceptionError> {
        let hs = self.homographies_for(frame)?;
        Ok(rectify_with(
            frame,
            &hs.inverse,
            self.params.rectify.fill,
            self.params.rectify.parallel,
        ))
    }

    /// Segment a rectified frame into the configured classes.
    pub fn classify(&self, rectified: &RgbImage) -> ClassMasks {
        let classes = &self.params.classes;
        ClassMasks {
            navigable: segment(rectified, &classes.navigable),
            obstacle: segment(rectified, &classes.obstacle),
            rock: segment(rectified, &classes.rock),
        }
    }

    /// Run one perception step on `state.frame` at `state.pose`.
    ///
    /// On error nothing in `state` is modified.
    pub fn perceive(
        &mut self,
        state: &mut VehicleState,
    ) -> Result<PerceptionReport, PerceptionError> {
        let result = self.perceive_inner(state);
        if let Err(err) = &result {
            warn!("Perception::perceive skipped frame: {err}");
        }
        result
    }

    fn perceive_inner(
        &mut self,
        state: &mut VehicleState,
    ) -> Result<PerceptionReport, PerceptionError> {
        let scale = self.params.scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PerceptionError::InvalidScale(scale));
        }
        let world_size = state.worldmap.size();
        if world_size == 0 {
            return Err(PerceptionError::EmptyWorldMap);
        }
        let (width, height) = (state.frame.w, state.frame.h);
        let pose = state.pose;
        debug!(
            "Perception::perceive start w={} h={} pos=({:.2}, {:.2}) yaw={:.1}",
            width, height, pose.x, pose.y, pose.yaw_deg
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let hs = self.homographies_for(&state.frame)?;
        let rectified = rectify_with(
            &state.frame,
            &hs.inverse,
            self.params.rectify.fill,
            self.params.rectify.parallel,
        );
        timings.record_since("rectify", stage);

        let stage = Instant::now();
        let masks = self.classify(&rectified);
        let classes = ClassCounts {
            navigable: masks.navigable.count(),
            obstacle: masks.obstacle.count(),
            rock: masks.rock.count(),
        };
        timings.record_since("segment", stage);
        debug!(
            "Perception::perceive classes navigable={} obstacle={} rock={}",
            classes.navigable, classes.obstacle, classes.rock
        );

        let stage = Instant::now();
        compose_overlay(&mut state.vision_image, &masks);
        timings.record_since("overlay", stage);

        let stage = Instant::now();
        let navigable = to_vehicle_frame(&masks.navigable);
        let obstacle = to_vehicle_frame(&masks.obstacle);
        let rock = to_vehicle_frame(&masks.rock);
        timings.record_since("vehicle_frame", stage);

        let stage = Instant::now();
        for (points, channel) in [
            (&obstacle, MapChannel::Obstacle),
            (&rock, MapChannel::Rock),
            (&navigable, MapChannel::Navigable),
        ] {
            let cells = to_world(points, &pose, world_size, scale);
            accumulate(&mut state.worldmap, &cells, channel);
        }
        timings.record_since("world_map", stage);

        let stage = Instant::now();
        let polar = to_polar(&navigable);
        let navigation = NavigationSummary::from_polar(&polar);
        state.nav_dists = polar.dists;
        state.nav_angles = polar.angles;
        timings.record_since("polar", stage);

        let novel_fraction = match state.visits.as_mut() {
            Some(log) => {
                let stage = Instant::now();
                let fraction = log.novel_fraction(&navigable, &pose, scale);
                log.mark(&pose);
                timings.record_since("visits", stage);
                fraction
            }
            None => None,
        };

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "Perception::perceive done nav_points={} mean_angle_deg={:?} total_ms={:.3}",
            navigation.points, navigation.mean_angle_deg, timings.total_ms
        );

        Ok(PerceptionReport {
            input: InputDescriptor {
                width,
                height,
                world_size,
                pose,
            },
            homography: hs.forward,
            classes,
            navigation,
            novel_fraction,
            timings,
        })
    }

    fn homographies_for(&mut self, frame: &RgbImage) -> Result<Homographies, PerceptionError> {
        if frame.is_empty() {
            return Err(PerceptionError::EmptyFrame {
                width: frame.w,
                height: frame.h,
            });
        }
        self.workspace
            .homographies(frame.w, frame.h, &self.params.rectify)
            .ok_or(PerceptionError::DegenerateQuads)
    }
}

/// Overwrite `overlay` with the class masks: navigable in channel 0, rock in
/// channel 1, obstacle in channel 2, each scaled to 0/255. The overlay is
/// resized to the mask size when needed.
pub fn compose_overlay(overlay: &mut RgbImage, masks: &ClassMasks) {
    let (w, h) = (masks.navigable.w, masks.navigable.h);
    overlay.ensure_size(w, h);
    for y in 0..h {
        let nav = masks.navigable.row(y);
        let rock = masks.rock.row(y);
        let obs = masks.obstacle.row(y);
        let start = overlay.idx(0, y);
        for (x, px) in overlay.data[start..start + w].iter_mut().enumerate() {
            *px = [on(nav[x]), on(rock[x]), on(obs[x])];
        }
    }
}

#[inline]
fn on(v: u8) -> u8 {
    if v != 0 {
        255
    } else {
        0
    }
}
