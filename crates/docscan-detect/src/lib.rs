//! Document boundary detector built on top of `docscan-core`.
//!
//! ## Quickstart
//!
//! ```
//! use docscan_core::RgbImage;
//! use docscan_detect::{BoundaryDetector, DetectionParams, DetectionResult};
//!
//! let detector = BoundaryDetector::new(DetectionParams::preview());
//! let frame = RgbImage::new(320, 240);
//! match detector.detect(&frame) {
//!     DetectionResult::Found { quad, area } => {
//!         println!("document at {:?}, {} px^2", quad.corners(), area);
//!     }
//!     DetectionResult::NotFound => println!("no document in frame"),
//! }
//! ```
//!
//! Pipeline, per frame:
//! 1. Grayscale + Gaussian blur (`blur_kernel`).
//! 2. Canny edge map (`canny_low`, `canny_high`).
//! 3. External contours of the edge map (one outer border per
//!    8-connected component).
//! 4. Per contour: area gate, Douglas-Peucker simplification, keep only
//!    exact quadrilaterals.
//! 5. Rectangularity gate: all interior angles within
//!    `angle_tolerance_deg` of 90.
//! 6. Largest area wins; ties go to the first candidate in contour
//!    scan order.

mod blur;
mod canny;
mod contour;
mod detector;
mod params;
mod simplify;

pub use blur::gaussian_blur;
pub use canny::canny_edges;
pub use contour::{external_contours, Contour};
pub use detector::{BoundaryDetector, DetectionResult};
pub use params::DetectionParams;
pub use simplify::simplify_closed_polygon;
