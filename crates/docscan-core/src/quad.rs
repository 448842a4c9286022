//! Quadrilateral type and the canonical corner ordering.
//!
//! Image coordinates: x grows right, y grows down. The canonical order
//! is `[top-left, top-right, bottom-right, bottom-left]` and every
//! consumer (overlay, rectifier) relies on it, so a `Quad` is only
//! constructed through [`order_corners`].

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An ordered document boundary: `[TL, TR, BR, BL]` in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    corners: [Point2<f32>; 4],
}

impl Quad {
    #[inline]
    pub fn corners(&self) -> &[Point2<f32>; 4] {
        &self.corners
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f32> {
        self.corners[0]
    }

    #[inline]
    pub fn top_right(&self) -> Point2<f32> {
        self.corners[1]
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f32> {
        self.corners[2]
    }

    #[inline]
    pub fn bottom_left(&self) -> Point2<f32> {
        self.corners[3]
    }

    /// Enclosed area in square pixels.
    pub fn area(&self) -> f64 {
        polygon_area(&self.corners)
    }
}

#[inline]
fn cmp_y_then_x(a: &Point2<f32>, b: &Point2<f32>) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Order four arbitrary points into the canonical `[TL, TR, BR, BL]`.
///
/// Sorts by y (ties by x); the two smallest-y points form the top pair
/// and the two largest-y the bottom pair. Both pairs are resolved
/// ascending by x. Total and deterministic for any input, and
/// idempotent: reordering an already-ordered quad is a no-op.
pub fn order_corners(points: [Point2<f32>; 4]) -> Quad {
    let mut sorted = points;
    sorted.sort_by(cmp_y_then_x);

    let (tl, tr) = if sorted[0].x <= sorted[1].x {
        (sorted[0], sorted[1])
    } else {
        (sorted[1], sorted[0])
    };
    let (bl, br) = if sorted[2].x <= sorted[3].x {
        (sorted[2], sorted[3])
    } else {
        (sorted[3], sorted[2])
    };

    Quad {
        corners: [tl, tr, br, bl],
    }
}

/// Shoelace area of a closed polygon, in square pixels.
pub fn polygon_area(points: &[Point2<f32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        acc += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    acc.abs() * 0.5
}

/// Perimeter of a closed polygon.
pub fn perimeter(points: &[Point2<f32>]) -> f64 {
    let mut acc = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let dx = (q.x - p.x) as f64;
        let dy = (q.y - p.y) as f64;
        acc += (dx * dx + dy * dy).sqrt();
    }
    acc
}

/// Interior angle at each vertex of a closed polygon, in degrees.
///
/// The angle at vertex `i` is between the edges toward its two
/// neighbors (arccos of the normalized dot product). A degenerate
/// zero-length edge yields an angle of 0 for that vertex.
pub fn interior_angles(points: &[Point2<f32>]) -> Vec<f64> {
    let n = points.len();
    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let v = points[i];
        let next = points[(i + 1) % n];

        let ax = (prev.x - v.x) as f64;
        let ay = (prev.y - v.y) as f64;
        let bx = (next.x - v.x) as f64;
        let by = (next.y - v.y) as f64;

        let ma = (ax * ax + ay * ay).sqrt();
        let mb = (bx * bx + by * by).sqrt();
        if ma == 0.0 || mb == 0.0 {
            angles.push(0.0);
            continue;
        }
        let cos = ((ax * bx + ay * by) / (ma * mb)).clamp(-1.0, 1.0);
        angles.push(cos.acos().to_degrees());
    }
    angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    fn square() -> [Point2<f32>; 4] {
        [pt(10.0, 10.0), pt(90.0, 10.0), pt(90.0, 70.0), pt(10.0, 70.0)]
    }

    #[test]
    fn orders_into_canonical_sequence() {
        let q = order_corners([pt(90.0, 70.0), pt(10.0, 10.0), pt(10.0, 70.0), pt(90.0, 10.0)]);
        assert_eq!(q.top_left(), pt(10.0, 10.0));
        assert_eq!(q.top_right(), pt(90.0, 10.0));
        assert_eq!(q.bottom_right(), pt(90.0, 70.0));
        assert_eq!(q.bottom_left(), pt(10.0, 70.0));
    }

    #[test]
    fn idempotent_under_all_permutations() {
        let pts = square();
        let canonical = order_corners(pts);

        // all 24 permutations of 4 indices
        let mut perms = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let idx = [a, b, c, d];
                        let mut seen = [false; 4];
                        idx.iter().for_each(|&i| seen[i] = true);
                        if seen.iter().all(|&s| s) {
                            perms.push(idx);
                        }
                    }
                }
            }
        }
        assert_eq!(perms.len(), 24);

        for idx in perms {
            let shuffled = [pts[idx[0]], pts[idx[1]], pts[idx[2]], pts[idx[3]]];
            let once = order_corners(shuffled);
            assert_eq!(once, canonical);
            assert_eq!(order_corners(*once.corners()), once);
        }
    }

    #[test]
    fn tilted_quad_keeps_left_right_assignment() {
        // mild perspective tilt: top edge shorter than bottom
        let q = order_corners([pt(30.0, 5.0), pt(70.0, 8.0), pt(95.0, 60.0), pt(5.0, 62.0)]);
        assert_eq!(q.top_left(), pt(30.0, 5.0));
        assert_eq!(q.top_right(), pt(70.0, 8.0));
        assert_eq!(q.bottom_right(), pt(95.0, 60.0));
        assert_eq!(q.bottom_left(), pt(5.0, 62.0));
    }

    #[test]
    fn shoelace_area_of_rectangle() {
        assert_relative_eq!(polygon_area(&square()), 80.0 * 60.0, epsilon = 1e-6);
    }

    #[test]
    fn perimeter_of_rectangle() {
        assert_relative_eq!(perimeter(&square()), 280.0, epsilon = 1e-6);
    }

    #[test]
    fn rectangle_angles_are_right() {
        for a in interior_angles(&square()) {
            assert_relative_eq!(a, 90.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn sliver_angles_are_not_right() {
        let sliver = [pt(0.0, 0.0), pt(100.0, 0.0), pt(103.0, 3.0), pt(3.0, 3.0)];
        let angles = interior_angles(&sliver);
        assert!(angles.iter().any(|a| (a - 90.0).abs() > 30.0));
    }
}
