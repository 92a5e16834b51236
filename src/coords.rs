//! Conversions from rectified-image masks into vehicle-centred coordinates.
//!
//! The bottom-centre of the rectified image is the vehicle's ground-contact
//! point. Image rows grow downwards while vehicle x grows forwards, and image
//! columns grow rightwards while vehicle y grows to the left.

use crate::angle::wrap_pi;
use crate::image::{BinaryMask, ImageView};
use crate::types::{PolarPoints, VehiclePoints};

/// Collect the set pixels of `mask` as vehicle-frame points, in raster order.
///
/// For a pixel at `(row, col)`: `x = height - row`, `y = width / 2 - col`.
pub fn to_vehicle_frame(mask: &BinaryMask) -> VehiclePoints {
    let h = mask.h as f32;
    let half_w = mask.w as f32 / 2.0;
    let mut pts = VehiclePoints::with_capacity(mask.count());
    for (row, line) in mask.rows().enumerate() {
        for (col, &v) in line.iter().enumerate() {
            if v != 0 {
                pts.push(h - row as f32, half_w - col as f32);
            }
        }
    }
    pts
}

/// Distance and bearing of every vehicle-frame point.
pub fn to_polar(points: &VehiclePoints) -> PolarPoints {
    let (dists, angles) = points
        .iter()
        .map(|(x, y)| (x.hypot(y), wrap_pi(y.atan2(x))))
        .unzip();
    PolarPoints { dists, angles }
}
