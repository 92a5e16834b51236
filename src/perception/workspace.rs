//! Per-frame-size cache of the rectifying homographies.
//!
//! The quads only depend on the frame size, so the 8×8 solve runs once per
//! size instead of once per frame.
use super::params::RectifyParams;
use nalgebra::Matrix3;

#[derive(Clone, Debug, Default)]
pub struct RectifierWorkspace {
    key: Option<(usize, usize)>,
    cached: Option<Homographies>,
}

/// Forward (camera → rectified) and inverse homography pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homographies {
    pub forward: Matrix3<f64>,
    pub inverse: Matrix3<f64>,
}

impl RectifierWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached matrices.
    pub fn reset(&mut self) {
        self.key = None;
        self.cached = None;
    }

    /// Homographies for a `w × h` frame, solving only when the size changes.
    pub fn homographies(
        &mut self,
        w: usize,
        h: usize,
        params: &RectifyParams,
    ) -> Option<Homographies> {
        if self.key != Some((w, h)) {
            let quads = params.quads_for(w, h);
            self.cached = quads
                .homography()
                .zip(quads.inverse_homography())
                .map(|(forward, inverse)| Homographies { forward, inverse });
            self.key = Some((w, h));
        }
        self.cached
    }
}
