use serde::{Deserialize, Serialize};

/// Tunable knobs for one boundary-detection pass.
///
/// Two presets cover the two call sites: [`DetectionParams::preview`]
/// for the live overlay (looser thresholds, smaller blur, tolerates
/// false positives for responsiveness) and [`DetectionParams::capture`]
/// for the final still (stricter thresholds, favors precision).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Gaussian blur kernel side, in pixels. Must be odd; sigma is
    /// derived from the kernel size.
    pub blur_kernel: usize,
    /// Lower hysteresis threshold for Canny, on unnormalized 3x3 Sobel
    /// L2 gradient magnitude.
    pub canny_low: f64,
    /// Upper hysteresis threshold for Canny.
    pub canny_high: f64,
    /// Contours enclosing less than this area (square pixels) are
    /// rejected as noise specks.
    pub min_contour_area: f64,
    /// Douglas-Peucker tolerance as a fraction of contour perimeter.
    pub approx_epsilon_factor: f64,
    /// A candidate is kept only if every interior angle lies within
    /// this many degrees of 90.
    pub angle_tolerance_deg: f64,
}

impl DetectionParams {
    /// Live-preview pass: fast, sensitive, some false positives are fine.
    pub fn preview() -> Self {
        Self {
            blur_kernel: 3,
            canny_low: 20.0,
            canny_high: 60.0,
            min_contour_area: 500.0,
            approx_epsilon_factor: 0.02,
            angle_tolerance_deg: 30.0,
        }
    }

    /// Final-capture pass: larger blur, higher thresholds, precision first.
    pub fn capture() -> Self {
        Self {
            blur_kernel: 5,
            canny_low: 75.0,
            canny_high: 200.0,
            min_contour_area: 500.0,
            approx_epsilon_factor: 0.02,
            angle_tolerance_deg: 30.0,
        }
    }

    /// Check the knobs are usable: odd blur kernel, ordered Canny
    /// thresholds, positive area/epsilon/tolerance.
    pub fn validate(&self) -> Result<(), String> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(format!("blur_kernel must be odd, got {}", self.blur_kernel));
        }
        if !(self.canny_low > 0.0 && self.canny_high > self.canny_low) {
            return Err(format!(
                "canny thresholds must satisfy 0 < low < high, got ({}, {})",
                self.canny_low, self.canny_high
            ));
        }
        if self.min_contour_area <= 0.0 {
            return Err(format!(
                "min_contour_area must be positive, got {}",
                self.min_contour_area
            ));
        }
        if self.approx_epsilon_factor <= 0.0 {
            return Err(format!(
                "approx_epsilon_factor must be positive, got {}",
                self.approx_epsilon_factor
            ));
        }
        if self.angle_tolerance_deg <= 0.0 || self.angle_tolerance_deg >= 90.0 {
            return Err(format!(
                "angle_tolerance_deg must be in (0, 90), got {}",
                self.angle_tolerance_deg
            ));
        }
        Ok(())
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(DetectionParams::preview().validate().is_ok());
        assert!(DetectionParams::capture().validate().is_ok());
    }

    #[test]
    fn even_kernel_is_rejected() {
        let mut p = DetectionParams::preview();
        p.blur_kernel = 4;
        assert!(p.validate().is_err());
    }

    #[test]
    fn inverted_canny_thresholds_are_rejected() {
        let mut p = DetectionParams::capture();
        p.canny_low = p.canny_high + 1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let p = DetectionParams::capture();
        let s = serde_json::to_string(&p).unwrap();
        let q: DetectionParams = serde_json::from_str(&s).unwrap();
        assert_eq!(q.blur_kernel, p.blur_kernel);
        assert_eq!(q.canny_high, p.canny_high);
    }
}
