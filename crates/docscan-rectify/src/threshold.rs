//! Local adaptive thresholding for the scanned-document look.
//!
//! A pixel is white when it is brighter than the Gaussian-weighted mean
//! of its neighborhood minus `bias`. The window is large relative to
//! stroke width so uneven lighting shifts the local mean along with the
//! pixels, keeping text dark and paper white.

use docscan_core::{GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

/// Knobs for [`adaptive_threshold`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Side of the Gaussian-weighted window, in pixels. Must be odd.
    pub window: usize,
    /// Subtracted from the local mean before comparison; larger values
    /// push more mid-tones to white.
    pub bias: f64,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            window: 15,
            bias: 15.0,
        }
    }
}

impl ThresholdParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.window < 3 || self.window % 2 == 0 {
            return Err(format!("window must be odd and >= 3, got {}", self.window));
        }
        Ok(())
    }
}

fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
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

/// Binarize: 255 where `src > local_mean - bias`, else 0.
pub fn adaptive_threshold(src: &GrayImageView<'_>, params: &ThresholdParams) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let kernel = gaussian_kernel(params.window);
    let half = (params.window / 2) as i32;

    let clamp_x = |x: i32| x.clamp(0, w as i32 - 1) as usize;
    let clamp_y = |y: i32| y.clamp(0, h as i32 - 1) as usize;

    // separable Gaussian-weighted local mean
    let mut tmp = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (i, &kv) in kernel.iter().enumerate() {
                acc += row[clamp_x(x as i32 + i as i32 - half)] as f32 * kv;
            }
            tmp[y * w + x] = acc;
        }
    }

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut mean = 0.0f32;
            for (i, &kv) in kernel.iter().enumerate() {
                mean += tmp[clamp_y(y as i32 + i as i32 - half) * w + x] * kv;
            }
            let v = src.data[y * w + x] as f32;
            out[y * w + x] = if v > mean - params.bias as f32 { 255 } else { 0 };
        }
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}
