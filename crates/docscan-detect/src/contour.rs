//! External contour extraction from a binary edge map.
//!
//! Only outer boundaries matter for document detection (a page has a
//! single outer silhouette), so this labels 8-connected components and
//! traces exactly one outer border per component with Moore-neighbor
//! tracing, stopping per Jacob's criterion. Components are discovered
//! in raster order, which fixes the scan order the candidate tie-break
//! relies on.

use docscan_core::GrayImageView;
use nalgebra::Point2;

/// A closed polygon boundary, consumed immediately by candidate scoring.
pub type Contour = Vec<Point2<f32>>;

// 8 neighbors, clockwise in image coordinates (y down), starting east.
const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[inline]
fn is_set(map: &GrayImageView<'_>, x: i32, y: i32) -> bool {
    x >= 0
        && y >= 0
        && x < map.width as i32
        && y < map.height as i32
        && map.data[y as usize * map.width + x as usize] != 0
}

/// First set neighbor of `p`, sweeping clockwise from direction index
/// `from` (inclusive).
#[inline]
fn sweep(map: &GrayImageView<'_>, p: (i32, i32), from: usize) -> Option<(usize, (i32, i32))> {
    for k in 0..8 {
        let d = (from + k) % 8;
        let q = (p.0 + DIRS[d].0, p.1 + DIRS[d].1);
        if is_set(map, q.0, q.1) {
            return Some((d, q));
        }
    }
    None
}

/// Moore-neighbor trace of the outer border starting from the
/// raster-first pixel of a component (its W/NW/N/NE neighbors are
/// guaranteed background).
fn trace_outer_border(map: &GrayImageView<'_>, start: (i32, i32)) -> Vec<(i32, i32)> {
    let mut contour = vec![start];
    let Some((first_d, mut p)) = sweep(map, start, 5) else {
        // isolated pixel
        return contour;
    };
    let mut d = first_d;
    let limit = 4 * map.width * map.height;

    loop {
        if p == start {
            match sweep(map, p, (d + 6) % 8) {
                Some((nd, q)) if nd != first_d => {
                    contour.push(p);
                    d = nd;
                    p = q;
                }
                _ => break,
            }
        } else {
            contour.push(p);
            match sweep(map, p, (d + 6) % 8) {
                Some((nd, q)) => {
                    d = nd;
                    p = q;
                }
                None => break,
            }
        }
        if contour.len() >= limit {
            break;
        }
    }
    contour
}

/// Outer border of every 8-connected component of the edge map, in
/// raster discovery order. Nested/inner borders are never produced.
pub fn external_contours(map: &GrayImageView<'_>) -> Vec<Contour> {
    let (w, h) = (map.width, map.height);
    let mut labeled = vec![false; w * h];
    let mut contours = Vec::new();
    let mut queue = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if map.data[i] == 0 || labeled[i] {
                continue;
            }

            // raster-first pixel of a fresh component: trace its border,
            // then flood the component so it is not traced again
            let border = trace_outer_border(map, (x as i32, y as i32));
            contours.push(
                border
                    .iter()
                    .map(|&(bx, by)| Point2::new(bx as f32, by as f32))
                    .collect(),
            );

            labeled[i] = true;
            queue.push((x as i32, y as i32));
            while let Some((cx, cy)) = queue.pop() {
                for (dx, dy) in DIRS {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if is_set(map, nx, ny) {
                        let j = ny as usize * w + nx as usize;
                        if !labeled[j] {
                            labeled[j] = true;
                            queue.push((nx, ny));
                        }
                    }
                }
            }
        }
    }

    contours
}
