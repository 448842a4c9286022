use crate::{adaptive_threshold, ThresholdParams};
use docscan_core::{homography_from_quad, warp_perspective_rgb, RgbImage};
use docscan_detect::{BoundaryDetector, DetectionParams, DetectionResult};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors of the rectification pass.
#[derive(thiserror::Error, Debug)]
pub enum RectifyError {
    /// No qualifying boundary in the capture. The caller decides whether
    /// to keep the uncorrected image or reject the capture.
    #[error("no document boundary found in the captured image")]
    BoundaryNotFound,
    /// The detected corners admit no invertible perspective transform.
    #[error("detected corners are degenerate, perspective transform is singular")]
    DegenerateQuad,
}

/// Configuration for [`DocumentRectifier`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RectifyParams {
    /// Detection knobs for the capture pass. Stricter than the preview
    /// preset: the final still favors precision over latency.
    pub detection: DetectionParams,
    /// Post-processing binarization knobs.
    pub threshold: ThresholdParams,
}

impl Default for RectifyParams {
    fn default() -> Self {
        Self {
            detection: DetectionParams::capture(),
            threshold: ThresholdParams::default(),
        }
    }
}

/// Produces a perspective-corrected, binarized scan from a captured frame.
pub struct DocumentRectifier {
    detector: BoundaryDetector,
    threshold: ThresholdParams,
}

impl DocumentRectifier {
    pub fn new(params: RectifyParams) -> Self {
        Self {
            detector: BoundaryDetector::new(params.detection),
            threshold: params.threshold,
        }
    }

    /// Detect, warp, and clean up a captured still.
    ///
    /// Detection always re-runs on the full-resolution input; corners
    /// from a preview frame are never reused, so preview/capture scale
    /// mismatch and staleness cannot occur. The output keeps the input
    /// resolution; it is a framing choice, not an estimate of the
    /// physical page proportions. The input is never mutated.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn rectify(&self, image: &RgbImage) -> Result<RgbImage, RectifyError> {
        let quad = match self.detector.detect(image) {
            DetectionResult::Found { quad, area } => {
                log::debug!("capture-pass boundary found, area {area:.0} px^2");
                quad
            }
            DetectionResult::NotFound => return Err(RectifyError::BoundaryNotFound),
        };

        let (w, h) = (image.width, image.height);
        let target = [
            Point2::new(0.0f32, 0.0),
            Point2::new(w as f32 - 1.0, 0.0),
            Point2::new(w as f32 - 1.0, h as f32 - 1.0),
            Point2::new(0.0f32, h as f32 - 1.0),
        ];

        // warp samples destination -> source, so map target onto the quad
        let h_src_from_dst = homography_from_quad(&target, quad.corners())
            .ok_or(RectifyError::DegenerateQuad)?;
        let warped = warp_perspective_rgb(image, h_src_from_dst, w, h);

        let cleaned = adaptive_threshold(&warped.to_gray().view(), &self.threshold);
        Ok(RgbImage::from_gray(&cleaned))
    }
}
