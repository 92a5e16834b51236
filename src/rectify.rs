//! Bird's-eye rectification of camera frames.
//!
//! A fixed source quad (corners of a flat calibration square seen by the
//! camera) is mapped onto a small destination square centred horizontally at
//! the bottom of the frame. The output keeps the input dimensions; every
//! output pixel is pulled from the input through the inverse homography with
//! bilinear sampling. Samples that fall outside the input blend towards the
//! fill colour.

use crate::homography::{apply_homography_point, perspective_from_quads, Quad};
use crate::image::{ImageView, RgbImage};
use nalgebra::Matrix3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Image-space corners of the calibration square in the default camera setup,
/// ordered bottom-left, bottom-right, top-right, top-left.
pub const DEFAULT_SOURCE_QUAD: Quad =
    [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]];
/// Half the side length (pixels) of the destination square.
pub const DEFAULT_DST_HALF_SIZE: f64 = 5.0;
/// Distance (pixels) between the frame bottom and the destination square,
/// accounting for the camera sitting behind the visible ground.
pub const DEFAULT_BOTTOM_OFFSET: f64 = 6.0;

/// Source/destination corner pairs defining the rectifying homography.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveQuads {
    pub source: Quad,
    pub destination: Quad,
}

impl PerspectiveQuads {
    /// Build the quads for a `w × h` frame: the destination square has side
    /// `2 * half_size`, is centred at `w / 2` and sits `bottom_offset` pixels
    /// above the last row.
    pub fn for_frame(
        w: usize,
        h: usize,
        source: Quad,
        half_size: f64,
        bottom_offset: f64,
    ) -> Self {
        let cx = w as f64 / 2.0;
        let bottom = h as f64 - bottom_offset;
        let top = bottom - 2.0 * half_size;
        Self {
            source,
            destination: [
                [cx - half_size, bottom],
                [cx + half_size, bottom],
                [cx + half_size, top],
                [cx - half_size, top],
            ],
        }
    }

    /// Forward homography (camera image → rectified image).
    pub fn homography(&self) -> Option<Matrix3<f64>> {
        perspective_from_quads(&self.source, &self.destination)
    }

    /// Inverse homography (rectified image → camera image), used for sampling.
    pub fn inverse_homography(&self) -> Option<Matrix3<f64>> {
        perspective_from_quads(&self.destination, &self.source)
    }
}

/// Warp `image` into the top-down view defined by `quads`.
///
/// Returns `None` when the quads do not define a valid homography.
pub fn rectify(image: &RgbImage, quads: &PerspectiveQuads, fill: [u8; 3]) -> Option<RgbImage> {
    let inverse = quads.inverse_homography()?;
    Some(rectify_with(image, &inverse, fill, false))
}

/// Warp `image` through a precomputed inverse homography.
///
/// With `parallel` the rows are distributed over the rayon pool; the output is
/// identical to the sequential path.
pub fn rectify_with(
    image: &RgbImage,
    inverse: &Matrix3<f64>,
    fill: [u8; 3],
    parallel: bool,
) -> RgbImage {
    let mut out = RgbImage::new(image.w, image.h);
    if image.is_empty() {
        return out;
    }
    let stride = out.stride;
    if parallel {
        out.data
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| warp_row(image, inverse, fill, y, row));
    } else {
        for (y, row) in out.data.chunks_mut(stride).enumerate() {
            warp_row(image, inverse, fill, y, row);
        }
    }
    out
}

fn warp_row(
    src: &RgbImage,
    inverse: &Matrix3<f64>,
    fill: [u8; 3],
    y: usize,
    row: &mut [[u8; 3]],
) {
    for (x, dst) in row.iter_mut().enumerate() {
        *dst = match apply_homography_point(inverse, [x as f64, y as f64]) {
            Some([sx, sy]) => sample_bilinear(src, sx, sy, fill),
            None => fill,
        };
    }
}

fn sample_bilinear(src: &RgbImage, x: f64, y: f64, fill: [u8; 3]) -> [u8; 3] {
    let (w, h) = (src.w as f64, src.h as f64);
    if !(x > -1.0 && y > -1.0 && x < w && y < h) {
        return fill;
    }
    let x0f = x.floor();
    let y0f = y.floor();
    let fx = x - x0f;
    let fy = y - y0f;
    let (x0, y0) = (x0f as i64, y0f as i64);

    let p00 = pixel_or(src, x0, y0, fill);
    let p10 = pixel_or(src, x0 + 1, y0, fill);
    let p01 = pixel_or(src, x0, y0 + 1, fill);
    let p11 = pixel_or(src, x0 + 1, y0 + 1, fill);

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = p00[c] as f64 * w00
            + p10[c] as f64 * w10
            + p01[c] as f64 * w01
            + p11[c] as f64 * w11;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[inline]
fn pixel_or(src: &RgbImage, x: i64, y: i64, fill: [u8; 3]) -> [u8; 3] {
    if x < 0 || y < 0 || x >= src.w as i64 || y >= src.h as i64 {
        fill
    } else {
        src.get(x as usize, y as usize)
    }
}
