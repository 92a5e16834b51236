//! Per-pixel colour classification into binary masks.
//!
//! A class is an axis-aligned box in RGB space with exclusive bounds on both
//! ends: a pixel belongs to the class iff `low[c] < px[c] < high[c]` for all
//! three channels. Values equal to either bound are never selected, so pixels
//! filled with pure black or pure white fall outside a class whose bounds sit
//! at 0 or 255. Bilinear blends along the warp border are not pure fill and
//! may still land inside a class, typically as obstacle.

use crate::image::{BinaryMask, ImageView, ImageViewMut, RgbImage};
use serde::{Deserialize, Serialize};

/// Exclusive RGB range describing one terrain class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbRange {
    pub low: [u8; 3],
    pub high: [u8; 3],
}

/// Bright ground: all channels in (180, 255).
pub const NAVIGABLE_RANGE: RgbRange = RgbRange::new([180, 180, 180], [255, 255, 255]);
/// Dark walls and rocks: all channels in (0, 30).
pub const OBSTACLE_RANGE: RgbRange = RgbRange::new([0, 0, 0], [30, 30, 30]);
/// Yellow sample markers: R in (120, 230), G in (90, 200), B in (0, 70).
pub const ROCK_RANGE: RgbRange = RgbRange::new([120, 90, 0], [230, 200, 70]);

impl RgbRange {
    pub const fn new(low: [u8; 3], high: [u8; 3]) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn contains(&self, px: [u8; 3]) -> bool {
        (0..3).all(|c| self.low[c] < px[c] && px[c] < self.high[c])
    }
}

/// Classify every pixel of `image` against `range`.
pub fn segment(image: &RgbImage, range: &RgbRange) -> BinaryMask {
    let mut mask = BinaryMask::new(image.w, image.h);
    for y in 0..image.h {
        let src = image.row(y);
        let dst = mask.row_mut(y);
        for (out, &px) in dst.iter_mut().zip(src) {
            *out = u8::from(range.contains(px));
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_exclusive() {
        let range = RgbRange::new([10, 20, 30], [100, 110, 120]);
        assert!(range.contains([11, 21, 31]));
        assert!(range.contains([99, 109, 119]));
        assert!(!range.contains([10, 50, 50]));
        assert!(!range.contains([50, 20, 50]));
        assert!(!range.contains([50, 50, 30]));
        assert!(!range.contains([100, 50, 50]));
        assert!(!range.contains([50, 110, 50]));
        assert!(!range.contains([50, 50, 120]));
    }

    #[test]
    fn navigable_range_rejects_saturated_white() {
        assert!(NAVIGABLE_RANGE.contains([200, 200, 200]));
        assert!(!NAVIGABLE_RANGE.contains([255, 255, 255]));
        assert!(!NAVIGABLE_RANGE.contains([180, 200, 200]));
    }

    #[test]
    fn obstacle_range_rejects_black_fill() {
        assert!(!OBSTACLE_RANGE.contains([0, 0, 0]));
        assert!(OBSTACLE_RANGE.contains([1, 1, 1]));
        assert!(OBSTACLE_RANGE.contains([29, 29, 29]));
    }

    #[test]
    fn rock_range_is_per_channel() {
        assert!(ROCK_RANGE.contains([180, 150, 20]));
        assert!(!ROCK_RANGE.contains([180, 150, 80]));
        assert!(!ROCK_RANGE.contains([110, 150, 20]));
    }

    #[test]
    fn segment_marks_only_matching_pixels() {
        let mut img = RgbImage::new(3, 2);
        img.set(0, 0, [200, 200, 200]);
        img.set(2, 1, [190, 250, 181]);
        img.set(1, 1, [180, 200, 200]);
        let mask = segment(&img, &NAVIGABLE_RANGE);
        assert_eq!(mask.data, vec![1, 0, 0, 0, 0, 1]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn segment_of_empty_image_is_empty() {
        let img = RgbImage::new(0, 0);
        let mask = segment(&img, &ROCK_RANGE);
        assert_eq!(mask.count(), 0);
        assert!(mask.data.is_empty());
    }
}
