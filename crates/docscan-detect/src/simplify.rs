//! Closed-polygon simplification (Douglas-Peucker).
//!
//! The closed contour is opened at the vertex farthest from its first
//! point and simplified as a chain whose two endpoints coincide; the
//! first recursion level then splits at the true farthest vertex, which
//! handles the degenerate zero-length chord.

use nalgebra::Point2;

fn dist_sq(a: Point2<f32>, b: Point2<f32>) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    dx * dx + dy * dy
}

/// Distance from `p` to segment `[a, b]`; point distance when the
/// segment is degenerate.
fn dist_to_segment(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f64 {
    let len_sq = dist_sq(a, b);
    if len_sq < 1e-12 {
        return dist_sq(p, a).sqrt();
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) as f64 / len_sq)
        .clamp(0.0, 1.0);
    let proj = Point2::new(
        a.x + (t as f32) * (b.x - a.x),
        a.y + (t as f32) * (b.y - a.y),
    );
    dist_sq(p, proj).sqrt()
}

fn rdp(points: &[Point2<f32>], epsilon: f64, out: &mut Vec<Point2<f32>>) {
    let last = points.len() - 1;
    let mut max_dist = 0.0;
    let mut max_idx = 0;
    for (i, &p) in points.iter().enumerate().take(last).skip(1) {
        let d = dist_to_segment(p, points[0], points[last]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        rdp(&points[..=max_idx], epsilon, out);
        out.pop(); // split vertex is re-added by the second half
        rdp(&points[max_idx..], epsilon, out);
    } else {
        out.push(points[0]);
        out.push(points[last]);
    }
}

/// Simplify a closed polygon to its dominant vertices. `epsilon` is the
/// maximum allowed deviation in pixels (callers pass a fraction of the
/// contour perimeter). Polygons with fewer than 3 points pass through.
pub fn simplify_closed_polygon(points: &[Point2<f32>], epsilon: f64) -> Vec<Point2<f32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // open the ring at the vertex farthest from the first point
    let mut split = 0;
    let mut best = -1.0f64;
    for (i, &p) in points.iter().enumerate() {
        let d = dist_sq(points[0], p);
        if d > best {
            best = d;
            split = i;
        }
    }

    let mut chain = Vec::with_capacity(points.len() + 1);
    chain.extend_from_slice(&points[split..]);
    chain.extend_from_slice(&points[..split]);
    chain.push(points[split]);

    let mut out = Vec::new();
    rdp(&chain, epsilon, &mut out);
    out.pop(); // the chain ends where it starts
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    /// Dense rectangle boundary walked pixel by pixel.
    fn dense_rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point2<f32>> {
        let mut pts = Vec::new();
        for x in x0..x1 {
            pts.push(pt(x as f32, y0 as f32));
        }
        for y in y0..y1 {
            pts.push(pt(x1 as f32, y as f32));
        }
        for x in (x0 + 1..=x1).rev() {
            pts.push(pt(x as f32, y1 as f32));
        }
        for y in (y0 + 1..=y1).rev() {
            pts.push(pt(x0 as f32, y as f32));
        }
        pts
    }

    #[test]
    fn rectangle_boundary_reduces_to_four_vertices() {
        let pts = dense_rect(10, 10, 100, 60);
        let simplified = simplify_closed_polygon(&pts, 5.0);
        assert_eq!(simplified.len(), 4);
        for corner in [pt(10.0, 10.0), pt(100.0, 10.0), pt(100.0, 60.0), pt(10.0, 60.0)] {
            assert!(
                simplified.iter().any(|&p| dist_sq(p, corner) < 1.0),
                "missing corner {corner:?}"
            );
        }
    }

    #[test]
    fn jitter_below_epsilon_is_flattened() {
        let mut pts = dense_rect(10, 10, 100, 60);
        for (i, p) in pts.iter_mut().enumerate() {
            // +-1 px staircase noise along the boundary
            let j = if i % 2 == 0 { 0.8 } else { -0.8 };
            if p.y == 10.0 || p.y == 60.0 {
                p.y += j;
            } else {
                p.x += j;
            }
        }
        let simplified = simplify_closed_polygon(&pts, 4.0);
        assert_eq!(simplified.len(), 4);
    }

    #[test]
    fn pentagon_keeps_five_vertices() {
        let corners = [
            pt(50.0, 0.0),
            pt(100.0, 38.0),
            pt(81.0, 95.0),
            pt(19.0, 95.0),
            pt(0.0, 38.0),
        ];
        // densify each edge
        let mut pts = Vec::new();
        for i in 0..5 {
            let a = corners[i];
            let b = corners[(i + 1) % 5];
            for k in 0..20 {
                let t = k as f32 / 20.0;
                pts.push(pt(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)));
            }
        }
        let simplified = simplify_closed_polygon(&pts, 3.0);
        assert_eq!(simplified.len(), 5);
    }

    #[test]
    fn tiny_inputs_pass_through() {
        let pts = vec![pt(1.0, 1.0), pt(2.0, 2.0)];
        assert_eq!(simplify_closed_polygon(&pts, 1.0), pts);
    }
}
