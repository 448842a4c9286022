//! Canny edge detection: Sobel gradients, non-maximum suppression along
//! the gradient direction, and double-threshold hysteresis.
//!
//! Thresholds compare against unnormalized 3x3 Sobel L2 magnitude, so
//! the conventional (low, high) pairs for 8-bit input apply as-is.

use docscan_core::{GrayImage, GrayImageView};

struct Gradients {
    mag: Vec<f32>,
    // quantized direction sector: 0 = E/W, 1 = NE/SW, 2 = N/S, 3 = NW/SE
    sector: Vec<u8>,
}

fn sobel(src: &GrayImageView<'_>) -> Gradients {
    let (w, h) = (src.width, src.height);
    let mut mag = vec![0.0f32; w * h];
    let mut sector = vec![0u8; w * h];

    let px = |x: usize, y: usize| src.data[y * w + x] as f32;

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let gx = px(x + 1, y - 1) + 2.0 * px(x + 1, y) + px(x + 1, y + 1)
                - px(x - 1, y - 1)
                - 2.0 * px(x - 1, y)
                - px(x - 1, y + 1);
            let gy = px(x - 1, y + 1) + 2.0 * px(x, y + 1) + px(x + 1, y + 1)
                - px(x - 1, y - 1)
                - 2.0 * px(x, y - 1)
                - px(x + 1, y - 1);

            let i = y * w + x;
            mag[i] = (gx * gx + gy * gy).sqrt();

            // map the gradient angle to one of four sectors
            let angle = gy.atan2(gx).to_degrees();
            let a = if angle < 0.0 { angle + 180.0 } else { angle };
            sector[i] = if !(22.5..157.5).contains(&a) {
                0
            } else if a < 67.5 {
                1
            } else if a < 112.5 {
                2
            } else {
                3
            };
        }
    }

    Gradients { mag, sector }
}

/// Binary edge map (255 = edge) from hysteresis-thresholded, thinned
/// gradient magnitude.
pub fn canny_edges(src: &GrayImageView<'_>, low: f64, high: f64) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let g = sobel(src);

    // non-maximum suppression: keep only ridge pixels along the gradient
    let mut thin = vec![0.0f32; w * h];
    if w >= 3 && h >= 3 {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = y * w + x;
                let m = g.mag[i];
                if m == 0.0 {
                    continue;
                }
                let (a, b) = match g.sector[i] {
                    0 => (g.mag[i - 1], g.mag[i + 1]),
                    1 => (g.mag[i - w - 1], g.mag[i + w + 1]),
                    2 => (g.mag[i - w], g.mag[i + w]),
                    _ => (g.mag[i - w + 1], g.mag[i + w - 1]),
                };
                if m >= a && m >= b {
                    thin[i] = m;
                }
            }
        }
    }

    // hysteresis: strong pixels seed, weak pixels join via 8-connectivity
    let low = low as f32;
    let high = high as f32;
    let mut out = vec![0u8; w * h];
    let mut stack = Vec::new();
    for i in 0..w * h {
        if thin[i] >= high && out[i] == 0 {
            out[i] = 255;
            stack.push(i);
            while let Some(j) = stack.pop() {
                let x = (j % w) as i32;
                let y = (j / w) as i32;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                            continue;
                        }
                        let k = ny as usize * w + nx as usize;
                        if out[k] == 0 && thin[k] >= low {
                            out[k] = 255;
                            stack.push(k);
                        }
                    }
                }
            }
        }
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}
