//! Document rectification: capture-pass boundary detection, perspective
//! warp into an axis-aligned target rectangle, and adaptive-threshold
//! cleanup for a scanned-document look.
//!
//! ## Quickstart
//!
//! ```
//! use docscan_core::RgbImage;
//! use docscan_rectify::{DocumentRectifier, RectifyError, RectifyParams};
//!
//! let rectifier = DocumentRectifier::new(RectifyParams::default());
//! let captured = RgbImage::new(640, 480);
//! match rectifier.rectify(&captured) {
//!     Ok(scan) => println!("scan: {}x{}", scan.width, scan.height),
//!     Err(RectifyError::BoundaryNotFound) => println!("no document in capture"),
//!     Err(e) => eprintln!("rectification failed: {e}"),
//! }
//! ```

mod rectifier;
mod threshold;

pub use rectifier::{DocumentRectifier, RectifyError, RectifyParams};
pub use threshold::{adaptive_threshold, ThresholdParams};
