//! Rigid vehicle-to-world transform with grid clipping.
//!
//! Vehicle-frame points are rotated by the vehicle yaw, scaled from
//! rectified-image pixels into world cells, translated by the vehicle
//! position and finally truncated and clamped into the map.
//!
//! Rotation convention: yaw is measured in degrees, counter-clockwise from
//! world +x. At yaw 0 vehicle-forward is world +x and vehicle-left is world
//! +y; at yaw 90 vehicle-forward is world +y, so a point 25 px to the left
//! of the vehicle lands 25 px towards world -x.
//!
//! Clipping never drops points: anything projecting outside the grid is
//! collapsed onto the nearest border cell.

use crate::types::{VehiclePoints, WorldCells, WorldPointsF32, WorldPose};

/// Rotate points counter-clockwise by `yaw_deg`.
pub fn rotate(points: &VehiclePoints, yaw_deg: f32) -> VehiclePoints {
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    points
        .iter()
        .map(|(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect()
}

/// Divide by `scale` (pixels per world cell) and offset by `pos`.
pub fn translate(points: &VehiclePoints, pos: [f32; 2], scale: f32) -> VehiclePoints {
    points
        .iter()
        .map(|(x, y)| (x / scale + pos[0], y / scale + pos[1]))
        .collect()
}

/// Project vehicle-frame points into integer cells of a `world_size` grid.
pub fn to_world(
    points: &VehiclePoints,
    pose: &WorldPose,
    world_size: usize,
    scale: f32,
) -> WorldCells {
    let moved = translate(&rotate(points, pose.yaw_deg), pose.position(), scale);
    WorldCells {
        xs: moved.xs.iter().map(|&v| clip_index(v, world_size)).collect(),
        ys: moved.ys.iter().map(|&v| clip_index(v, world_size)).collect(),
    }
}

/// Project vehicle-frame points onto a grid `precision` times finer than the
/// world cells, returned as sub-cell indices.
///
/// Each coordinate becomes `clamp(trunc(v * precision), 0, quantized_size - 1)`.
pub fn to_sub_cells(
    points: &VehiclePoints,
    pose: &WorldPose,
    quantized_size: usize,
    scale: f32,
    precision: f32,
) -> WorldCells {
    let moved = translate(&rotate(points, pose.yaw_deg), pose.position(), scale);
    let quantize = |v: f32| clip_index(v * precision, quantized_size);
    WorldCells {
        xs: moved.xs.iter().map(|&v| quantize(v)).collect(),
        ys: moved.ys.iter().map(|&v| quantize(v)).collect(),
    }
}

/// Same projection as [`to_sub_cells`], returned in world units.
///
/// `quantized_size` bounds the quantized index: each coordinate becomes
/// `clamp(trunc(v * precision), 0, quantized_size - 1) / precision`.
pub fn to_world_float(
    points: &VehiclePoints,
    pose: &WorldPose,
    quantized_size: usize,
    scale: f32,
    precision: f32,
) -> WorldPointsF32 {
    let cells = to_sub_cells(points, pose, quantized_size, scale, precision);
    WorldPointsF32 {
        xs: cells.xs.iter().map(|&q| q as f32 / precision).collect(),
        ys: cells.ys.iter().map(|&q| q as f32 / precision).collect(),
    }
}

/// Truncate toward zero and clamp into `[0, size - 1]`. NaN maps to 0.
#[inline]
pub fn clip_index(v: f32, size: usize) -> usize {
    let max = size.saturating_sub(1) as i64;
    (v as i64).clamp(0, max) as usize
}
