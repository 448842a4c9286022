//! High-level facade for the `docscan-*` workspace.
//!
//! The pipeline turns camera frames into perspective-corrected,
//! binarized document scans:
//!
//! - frame decoding ([`decode_frame`], feature `image`): encoded bytes
//!   into an owned RGB grid, failing closed on malformed input;
//! - live-preview boundary detection ([`ScanPipeline::detect_preview`]):
//!   a [`DetectionResult`] per admitted frame, driving the overlay;
//! - capture rectification ([`ScanPipeline::rectify`]): re-detects on
//!   the full-resolution still, warps the page to the frame rectangle,
//!   and applies the scan-look threshold.
//!
//! ## Quickstart
//!
//! ```
//! use docscan::{PipelineConfig, ScanPipeline};
//! use docscan_core::RgbImage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = ScanPipeline::new(PipelineConfig::default())?;
//! let frame = RgbImage::new(640, 480);
//! let overlay = pipeline.detect_preview(&frame);
//! println!("document visible: {}", overlay.quad().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Threading contract
//!
//! The pipeline holds no mutable state: a capture-pass `rectify` may run
//! concurrently with the next preview `detect_preview` on independently
//! owned frames. Frame pacing is the caller's job — run detection on a
//! worker that pulls the most recent frame and drops the ones that
//! arrived while a detection was in flight (the reference cadence admits
//! at most one frame per 100 ms).
//!
//! ## API map
//! - `docscan_core`: images, quadrilaterals, corner ordering, homography.
//! - `docscan_detect`: the boundary detector and its parameters.
//! - `docscan_rectify`: perspective correction and binarization.

pub use docscan_core as core;
pub use docscan_detect as detect;
pub use docscan_rectify as rectify;

pub use docscan_core::{order_corners, Quad, RgbImage};
pub use docscan_detect::{BoundaryDetector, DetectionParams, DetectionResult};
pub use docscan_rectify::{DocumentRectifier, RectifyError, RectifyParams, ThresholdParams};

mod pipeline;
pub use pipeline::{PipelineConfig, PipelineError, ScanPipeline};

#[cfg(feature = "image")]
mod decode;
#[cfg(feature = "image")]
pub use decode::{decode_frame, DecodeError};
