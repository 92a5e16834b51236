//! Planar homographies from four point correspondences.
//!
//! The solver fixes `h33 = 1` and solves the resulting 8×8 linear system
//! exactly (no least squares), matching the classic four-point perspective
//! transform. Quads with three collinear corners admit no unique solution and
//! are rejected.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f64 = 1e-9;
/// Maximum reprojection error (pixels) tolerated on the input corners.
const REPROJ_TOL: f64 = 1e-3;

/// Four image-plane points in `[x, y]` order.
pub type Quad = [[f64; 2]; 4];

/// Compute the homography mapping each `src[i]` onto `dst[i]`.
///
/// Returns `None` when either quad is degenerate or the solve is ill-posed.
pub fn perspective_from_quads(src: &Quad, dst: &Quad) -> Option<Matrix3<f64>> {
    if is_degenerate_quad(src) || is_degenerate_quad(dst) {
        return None;
    }

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let [x, y] = src[i];
        let [u, v] = dst[i];
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }

    let h = a.lu().solve(&b)?;
    if h.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let hmtx = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);

    for (s, d) in src.iter().zip(dst) {
        let p = apply_homography_point(&hmtx, *s)?;
        if (p[0] - d[0]).abs() > REPROJ_TOL || (p[1] - d[1]).abs() > REPROJ_TOL {
            return None;
        }
    }
    Some(hmtx)
}

/// Map a single point through `h`. `None` when the point maps to infinity.
#[inline]
pub fn apply_homography_point(h: &Matrix3<f64>, p: [f64; 2]) -> Option<[f64; 2]> {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / w, v[1] / w])
}

/// Map a batch of points; fails as a whole if any point maps to infinity.
pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    pts.iter().map(|&p| apply_homography_point(h, p)).collect()
}

fn is_degenerate_quad(q: &Quad) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    if q.iter().flatten().any(|v| !v.is_finite()) {
        return true;
    }
    TRIPLES.iter().any(|&[i, j, k]| {
        let (a, b, c) = (q[i], q[j], q[k]);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        cross.abs() <= EPS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_pt(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn identity_quads_give_identity() {
        let q = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let h = perspective_from_quads(&q, &q).expect("valid quad");
        assert!((h - Matrix3::identity()).norm() < 1e-9);
    }

    #[test]
    fn maps_corners_exactly() {
        let src = [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]];
        let dst = [[155.0, 154.0], [165.0, 154.0], [165.0, 144.0], [155.0, 144.0]];
        let h = perspective_from_quads(&src, &dst).expect("valid quads");
        let mapped = apply_homography_points(&h, &src).expect("finite");
        for (m, d) in mapped.iter().zip(&dst) {
            assert!(approx_pt(*m, *d), "{m:?} vs {d:?}");
        }
    }

    #[test]
    fn inverse_maps_back() {
        let src = [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]];
        let dst = [[155.0, 154.0], [165.0, 154.0], [165.0, 144.0], [155.0, 144.0]];
        let h = perspective_from_quads(&src, &dst).expect("valid quads");
        let inv = h.try_inverse().expect("invertible");
        let p = apply_homography_point(&inv, [160.0, 150.0]).expect("finite");
        let back = apply_homography_point(&h, p).expect("finite");
        assert!(approx_pt(back, [160.0, 150.0]));
    }

    #[test]
    fn collinear_quad_is_rejected() {
        let src = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [0.0, 5.0]];
        let dst = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert!(perspective_from_quads(&src, &dst).is_none());
    }

    #[test]
    fn point_at_infinity_is_none() {
        let h = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert!(apply_homography_point(&h, [0.0, 3.0]).is_none());
        assert!(apply_homography_points(&h, &[[1.0, 1.0], [0.0, 3.0]]).is_none());
    }
}
