//! The pipeline handle: explicit initialization, then synchronous
//! detection/rectification calls.
//!
//! Initialization is the one place the pipeline can become unavailable
//! (a configuration that the vision passes cannot run with). It is
//! surfaced once, as a `Result` from [`ScanPipeline::new`]; a caller
//! that cannot construct a handle falls back to its uncorrected-capture
//! workflow. There is no ambient global state and no retry logic.

use docscan_core::RgbImage;
use docscan_detect::{BoundaryDetector, DetectionParams, DetectionResult};
use docscan_rectify::{DocumentRectifier, RectifyError, RectifyParams};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Full pipeline configuration: one preset per pass.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Live-preview detection knobs (looser, faster).
    pub preview: DetectionParams,
    /// Capture-pass detection and post-processing knobs (stricter).
    pub capture: RectifyParams,
}

/// The pipeline could not be brought up.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Immutable handle over the detection/rectification pipeline.
///
/// Every call owns its frame and allocates its result, so a handle can
/// be shared across threads freely; in particular an in-flight capture
/// rectification does not block the next preview detection.
pub struct ScanPipeline {
    preview: BoundaryDetector,
    capture: BoundaryDetector,
    rectifier: DocumentRectifier,
}

impl ScanPipeline {
    /// Validate the configuration and build the handle.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidConfig { reason };
        config.preview.validate().map_err(invalid)?;
        config.capture.detection.validate().map_err(invalid)?;
        config.capture.threshold.validate().map_err(invalid)?;

        Ok(Self {
            preview: BoundaryDetector::new(config.preview),
            capture: BoundaryDetector::new(config.capture.detection.clone()),
            rectifier: DocumentRectifier::new(config.capture),
        })
    }

    /// Per-frame boundary detection for the live overlay.
    ///
    /// `NotFound` is the normal "no document visible" answer; the caller
    /// clears the overlay and tries again on the next admitted frame.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn detect_preview(&self, frame: &RgbImage) -> DetectionResult {
        self.preview.detect(frame)
    }

    /// One-off detection with the stricter capture-pass parameters.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn detect_capture(&self, frame: &RgbImage) -> DetectionResult {
        self.capture.detect(frame)
    }

    /// Rectify a captured still into the final scan.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
    pub fn rectify(&self, frame: &RgbImage) -> Result<RgbImage, RectifyError> {
        self.rectifier.rectify(frame)
    }

    /// Decode an encoded frame buffer (see [`crate::decode_frame`]).
    #[cfg(feature = "image")]
    pub fn decode_frame(&self, bytes: &[u8]) -> Result<RgbImage, crate::DecodeError> {
        crate::decode_frame(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_handle() {
        assert!(ScanPipeline::new(PipelineConfig::default()).is_ok());
    }

    #[test]
    fn invalid_preview_kernel_is_rejected_at_startup() {
        let mut config = PipelineConfig::default();
        config.preview.blur_kernel = 4;
        match ScanPipeline::new(config) {
            Err(PipelineError::InvalidConfig { reason }) => {
                assert!(reason.contains("blur_kernel"));
            }
            Ok(_) => panic!("expected InvalidConfig"),
        }
    }

    #[test]
    fn invalid_threshold_window_is_rejected_at_startup() {
        let mut config = PipelineConfig::default();
        config.capture.threshold.window = 16;
        assert!(ScanPipeline::new(config).is_err());
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScanPipeline>();
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = PipelineConfig::default();
        let s = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back.preview.blur_kernel, config.preview.blur_kernel);
        assert_eq!(
            back.capture.detection.canny_high,
            config.capture.detection.canny_high
        );
    }
}
