//! Angle utilities for vehicle yaw and polar bearings.

use std::f32::consts::{PI, TAU};

/// Normalizes a heading in degrees into the range [0, 360).
#[inline]
pub fn normalize_yaw_deg(yaw_deg: f32) -> f32 {
    let norm = yaw_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if norm >= 360.0 {
        0.0
    } else {
        norm
    }
}

/// Wraps an angle in radians into the half-open range (-π, π].
#[inline]
pub fn wrap_pi(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let mut a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI {
        a += TAU;
    }
    a
}

/// Arithmetic mean of a set of bearings, in degrees.
///
/// Bearings produced from forward-facing terrain lie in (-π/2, π/2), so the
/// plain mean is well defined there. Returns `None` for an empty set.
pub fn mean_bearing_deg(angles: &[f32]) -> Option<f32> {
    if angles.is_empty() {
        return None;
    }
    let sum: f64 = angles.iter().map(|&a| a as f64).sum();
    Some(((sum / angles.len() as f64) as f32).to_degrees())
}
