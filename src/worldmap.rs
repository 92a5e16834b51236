//! Persistent evidence grid in world coordinates.
//!
//! The map is a square `size × size` grid with three counter channels. Counts
//! only ever grow; repeated observations of a cell raise its weight. Decay and
//! normalisation are left to consumers.

use crate::image::RgbImage;
use crate::types::WorldCells;
use serde::{Deserialize, Serialize};

/// Number of accumulator channels per cell.
pub const MAP_CHANNELS: usize = 3;

/// Evidence channel of the world map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapChannel {
    Obstacle = 0,
    Rock = 1,
    Navigable = 2,
}

impl MapChannel {
    pub const ALL: [MapChannel; MAP_CHANNELS] =
        [MapChannel::Obstacle, MapChannel::Rock, MapChannel::Navigable];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Square evidence grid indexed as `[y][x][channel]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldMap {
    size: usize,
    data: Vec<u32>,
}

impl WorldMap {
    /// Zero-initialised `size × size` map.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0; size * size * MAP_CHANNELS],
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, channel: MapChannel) -> usize {
        (y * self.size + x) * MAP_CHANNELS + channel.index()
    }

    /// Count at cell (x, y). Panics when the cell lies outside the map.
    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: MapChannel) -> u32 {
        assert!(x < self.size && y < self.size, "cell ({x}, {y}) outside map");
        self.data[self.idx(x, y, channel)]
    }

    /// Add one observation at (x, y). Counts saturate at `u32::MAX`.
    #[inline]
    pub fn increment(&mut self, x: usize, y: usize, channel: MapChannel) {
        assert!(x < self.size && y < self.size, "cell ({x}, {y}) outside map");
        let i = self.idx(x, y, channel);
        self.data[i] = self.data[i].saturating_add(1);
    }

    /// Sum of all counts in `channel`.
    pub fn channel_total(&self, channel: MapChannel) -> u64 {
        self.data
            .iter()
            .skip(channel.index())
            .step_by(MAP_CHANNELS)
            .map(|&v| v as u64)
            .sum()
    }

    /// Number of cells with a non-zero count in `channel`.
    pub fn observed_cells(&self, channel: MapChannel) -> usize {
        self.data
            .iter()
            .skip(channel.index())
            .step_by(MAP_CHANNELS)
            .filter(|&&v| v > 0)
            .count()
    }

    /// Render counts clamped to 255 as an RGB image (channel order as stored),
    /// with world +y pointing up.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.size, self.size);
        for y in 0..self.size {
            let row = self.size - 1 - y;
            for x in 0..self.size {
                let mut px = [0u8; MAP_CHANNELS];
                for ch in MapChannel::ALL {
                    px[ch.index()] = self.get(x, y, ch).min(255) as u8;
                }
                img.set(x, row, px);
            }
        }
        img
    }
}

/// Add one observation to `channel` for every cell in `cells`.
///
/// Cells must already be clipped into the map, as produced by
/// [`to_world`](crate::transform::to_world) with the map's size.
pub fn accumulate(map: &mut WorldMap, cells: &WorldCells, channel: MapChannel) {
    for (x, y) in cells.iter() {
        map.increment(x, y, channel);
    }
}
