//! 4-point homography estimation and perspective warps.
//!
//! The rectifier only ever has four correspondences (quad corners to
//! target rectangle corners), so there is no over-determined DLT here;
//! the 4-point system is solved exactly after Hartley normalization.

use crate::{sample_bilinear_rgb, sample_bilinear_u8, GrayImage, GrayImageView, RgbImage};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};

/// A plane projective transform, `p_dst ~ H * p_src`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    /// Apply the transform to a point (projective division included).
    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        let w = v[2];
        Point2::new((v[0] / w) as f32, (v[1] / w) as f32)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

/// Similarity transform centering `pts` and scaling mean distance to sqrt(2).
fn normalizing_transform(pts: &[Point2<f32>; 4]) -> Matrix3<f64> {
    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    for p in pts {
        cx += p.x as f64;
        cy += p.y as f64;
    }
    cx /= 4.0;
    cy /= 4.0;

    let mut mean_dist = 0.0f64;
    for p in pts {
        let dx = p.x as f64 - cx;
        let dy = p.y as f64 - cy;
        mean_dist += (dx * dx + dy * dy).sqrt();
    }
    mean_dist /= 4.0;

    let s = if mean_dist > 1e-12 {
        (2.0f64).sqrt() / mean_dist
    } else {
        1.0
    };
    Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}

#[inline]
fn transform_point(t: &Matrix3<f64>, p: Point2<f32>) -> Point2<f64> {
    let v = t * Vector3::new(p.x as f64, p.y as f64, 1.0);
    Point2::new(v[0] / v[2], v[1] / v[2])
}

/// Estimate H with `dst ~ H * src` from 4 corner correspondences.
///
/// Corner order must be consistent between `src` and `dst` (the caller
/// passes canonically ordered quads). Returns `None` when the corners
/// are degenerate (three collinear points make the system singular).
pub fn homography_from_quad(
    src: &[Point2<f32>; 4],
    dst: &[Point2<f32>; 4],
) -> Option<Homography> {
    let t_src = normalizing_transform(src);
    let t_dst = normalizing_transform(dst);

    // Unknowns [h11..h32] with h33 = 1. Each correspondence (x,y)->(u,v):
    //   h11 x + h12 y + h13 - u h31 x - u h32 y = u
    //   h21 x + h22 y + h23 - v h31 x - v h32 y = v
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for k in 0..4 {
        let s = transform_point(&t_src, src[k]);
        let d = transform_point(&t_dst, dst[k]);

        let r0 = 2 * k;
        a[(r0, 0)] = s.x;
        a[(r0, 1)] = s.y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -d.x * s.x;
        a[(r0, 7)] = -d.x * s.y;
        b[r0] = d.x;

        let r1 = r0 + 1;
        a[(r1, 3)] = s.x;
        a[(r1, 4)] = s.y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -d.y * s.x;
        a[(r1, 7)] = -d.y * s.y;
        b[r1] = d.y;
    }

    let x = a.lu().solve(&b)?;
    let hn = Matrix3::new(
        x[0], x[1], x[2], //
        x[3], x[4], x[5], //
        x[6], x[7], 1.0,
    );

    // Denormalize: H = T_dst^{-1} * Hn * T_src, then fix h33 = 1.
    let h = t_dst.try_inverse()? * hn * t_src;
    let s = h[(2, 2)];
    if s.abs() < 1e-12 {
        return None;
    }
    Some(Homography::new(h / s))
}

/// Warp a grayscale image: each destination pixel `(x, y)` is sampled
/// from the source at `h_src_from_dst * (x, y)`.
pub fn warp_perspective_gray(
    src: &GrayImageView<'_>,
    h_src_from_dst: Homography,
    out_w: usize,
    out_h: usize,
) -> GrayImage {
    let mut out = vec![0u8; out_w * out_h];
    for y in 0..out_h {
        for x in 0..out_w {
            let p = h_src_from_dst.apply(Point2::new(x as f32, y as f32));
            out[y * out_w + x] = sample_bilinear_u8(src, p.x, p.y);
        }
    }
    GrayImage {
        width: out_w,
        height: out_h,
        data: out,
    }
}

/// Interleaved-RGB counterpart of [`warp_perspective_gray`].
pub fn warp_perspective_rgb(
    src: &RgbImage,
    h_src_from_dst: Homography,
    out_w: usize,
    out_h: usize,
) -> RgbImage {
    let mut out = vec![0u8; out_w * out_h * 3];
    for y in 0..out_h {
        for x in 0..out_w {
            let p = h_src_from_dst.apply(Point2::new(x as f32, y as f32));
            let px = sample_bilinear_rgb(src, p.x, p.y);
            let i = (y * out_w + x) * 3;
            out[i..i + 3].copy_from_slice(&px);
        }
    }
    RgbImage {
        width: out_w,
        height: out_h,
        data: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2<f32>, b: Point2<f32>, tol: f32) {
        assert!(
            (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol,
            "expected ({:.4},{:.4}) ~ ({:.4},{:.4})",
            a.x,
            a.y,
            b.x,
            b.y
        );
    }

    #[test]
    fn recovers_known_transform_from_corners() {
        let ground_truth = Homography::new(Matrix3::new(
            0.8, 0.05, 120.0, //
            -0.02, 1.1, 80.0, //
            0.0009, -0.0004, 1.0,
        ));

        let rect = [
            Point2::new(0.0f32, 0.0),
            Point2::new(180.0f32, 0.0),
            Point2::new(180.0f32, 130.0),
            Point2::new(0.0f32, 130.0),
        ];
        let img = rect.map(|p| ground_truth.apply(p));

        let recovered = homography_from_quad(&rect, &img).expect("solvable");
        for p in [
            Point2::new(0.0f32, 0.0),
            Point2::new(60.0, 40.0),
            Point2::new(150.0, 120.0),
        ] {
            assert_close(recovered.apply(p), ground_truth.apply(p), 1e-3);
        }
    }

    #[test]
    fn inverse_round_trips_points() {
        let h = Homography::new(Matrix3::new(
            1.2, 0.1, 5.0, //
            -0.05, 0.9, 3.0, //
            0.001, 0.0005, 1.0,
        ));
        let inv = h.inverse().expect("invertible");
        for p in [
            Point2::new(0.0f32, 0.0),
            Point2::new(50.0f32, -20.0),
            Point2::new(320.0f32, 200.0),
        ] {
            assert_close(inv.apply(h.apply(p)), p, 1e-3);
        }
    }

    #[test]
    fn degenerate_correspondences_are_rejected() {
        // a repeated correspondence duplicates two rows of the system
        let src = [
            Point2::new(0.0f32, 0.0),
            Point2::new(0.0f32, 0.0),
            Point2::new(10.0f32, 10.0),
            Point2::new(0.0f32, 10.0),
        ];
        let dst = [
            Point2::new(5.0f32, 5.0),
            Point2::new(5.0f32, 5.0),
            Point2::new(10.0f32, 10.0),
            Point2::new(0.0f32, 10.0),
        ];
        assert!(homography_from_quad(&src, &dst).is_none());
    }

    #[test]
    fn identity_warp_preserves_pixels() {
        let mut src = GrayImage::new(4, 3);
        for (i, v) in src.data.iter_mut().enumerate() {
            *v = (i * 17 % 251) as u8;
        }
        let warped = warp_perspective_gray(
            &src.view(),
            Homography::new(Matrix3::identity()),
            4,
            3,
        );
        assert_eq!(warped.data, src.data);
    }
}
