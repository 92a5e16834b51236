//! Value types shared by the perception stages.

use crate::angle::normalize_yaw_deg;
use serde::{Deserialize, Serialize};

/// Vehicle pose in the world frame.
///
/// Position is in world grid units; heading is in degrees, counter-clockwise
/// from world +x, normalized into [0, 360).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldPose {
    pub x: f32,
    pub y: f32,
    pub yaw_deg: f32,
}

impl WorldPose {
    pub fn new(x: f32, y: f32, yaw_deg: f32) -> Self {
        Self {
            x,
            y,
            yaw_deg: normalize_yaw_deg(yaw_deg),
        }
    }

    #[inline]
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Points in the vehicle frame: origin at the ground-contact point,
/// x forward, y left. Units are rectified-image pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehiclePoints {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl VehiclePoints {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
        }
    }

    pub fn from_pairs(pairs: &[(f32, f32)]) -> Self {
        pairs.iter().copied().collect()
    }

    #[inline]
    pub fn push(&mut self, x: f32, y: f32) {
        self.xs.push(x);
        self.ys.push(y);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

impl FromIterator<(f32, f32)> for VehiclePoints {
    fn from_iter<T: IntoIterator<Item = (f32, f32)>>(iter: T) -> Self {
        let (xs, ys) = iter.into_iter().unzip();
        Self { xs, ys }
    }
}

/// Polar form of a vehicle-frame point set: distance >= 0 and bearing in
/// (-π, π], one entry per source point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolarPoints {
    pub dists: Vec<f32>,
    pub angles: Vec<f32>,
}

impl PolarPoints {
    #[inline]
    pub fn len(&self) -> usize {
        self.dists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }
}

/// Integer world-grid cells, always inside `[0, size - 1]` on both axes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldCells {
    pub xs: Vec<usize>,
    pub ys: Vec<usize>,
}

impl WorldCells {
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Sub-cell world coordinates quantized to `1 / precision` steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldPointsF32 {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl WorldPointsF32 {
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}
