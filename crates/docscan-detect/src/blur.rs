//! Separable Gaussian blur on grayscale buffers.

use docscan_core::{GrayImage, GrayImageView};

/// Sigma for an odd kernel size, matching the usual convention when the
/// caller leaves sigma unspecified.
fn sigma_for_kernel(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = sigma_for_kernel(ksize);
    let half = (ksize / 2) as i32;
    let inv = 1.0 / (2.0 * sigma * sigma);
    let mut k: Vec<f32> = (-half..=half)
        .map(|i| (-(i * i) as f32 * inv).exp())
        .collect();
    let sum: f32 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

/// Blur with an odd `ksize x ksize` Gaussian kernel. Borders replicate
/// the edge pixel so document edges at the frame border do not darken.
pub fn gaussian_blur(src: &GrayImageView<'_>, ksize: usize) -> GrayImage {
    debug_assert!(ksize % 2 == 1, "kernel size must be odd");
    let (w, h) = (src.width, src.height);
    let kernel = gaussian_kernel(ksize);
    let half = (ksize / 2) as i32;

    let clamp_x = |x: i32| x.clamp(0, w as i32 - 1) as usize;
    let clamp_y = |y: i32| y.clamp(0, h as i32 - 1) as usize;

    // horizontal pass
    let mut tmp = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (i, &kv) in kernel.iter().enumerate() {
                let sx = clamp_x(x as i32 + i as i32 - half);
                acc += row[sx] as f32 * kv;
            }
            tmp[y * w + x] = acc;
        }
    }

    // vertical pass
    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (i, &kv) in kernel.iter().enumerate() {
                let sy = clamp_y(y as i32 + i as i32 - half);
                acc += tmp[sy * w + x] * kv;
            }
            out[y * w + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}
