use crate::{
    canny_edges, external_contours, gaussian_blur, simplify_closed_polygon, DetectionParams,
};
use docscan_core::{
    interior_angles, order_corners, perimeter, polygon_area, GrayImage, Quad, RgbImage,
};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Outcome of one detection pass. `NotFound` is the expected
/// "no document visible" state, not a failure.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectionResult {
    Found {
        quad: Quad,
        /// Enclosed area of the winning contour, square pixels.
        area: f64,
    },
    NotFound,
}

impl DetectionResult {
    #[inline]
    pub fn quad(&self) -> Option<&Quad> {
        match self {
            Self::Found { quad, .. } => Some(quad),
            Self::NotFound => None,
        }
    }
}

/// Finds the quadrilateral most likely to be a document's edge.
///
/// Stateless beyond its parameters: every call owns its intermediate
/// buffers and two calls may run concurrently on independent frames.
#[derive(Clone, Debug)]
pub struct BoundaryDetector {
    params: DetectionParams,
}

impl BoundaryDetector {
    pub fn new(params: DetectionParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Detect the document boundary in a color frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn detect(&self, image: &RgbImage) -> DetectionResult {
        let gray = image.to_gray();
        self.detect_gray_owned(gray)
    }

    fn detect_gray_owned(&self, gray: GrayImage) -> DetectionResult {
        let p = &self.params;
        let blurred = gaussian_blur(&gray.view(), p.blur_kernel);
        let edges = canny_edges(&blurred.view(), p.canny_low, p.canny_high);
        let contours = external_contours(&edges.view());
        log::debug!("detect: {} external contours", contours.len());

        let mut best: Option<(f64, [Point2<f32>; 4])> = None;
        let mut candidates = 0usize;

        for contour in &contours {
            let area = polygon_area(contour);
            if area < p.min_contour_area {
                continue;
            }

            let epsilon = p.approx_epsilon_factor * perimeter(contour);
            let poly = simplify_closed_polygon(contour, epsilon);
            if poly.len() != 4 {
                continue;
            }

            let corners = [poly[0], poly[1], poly[2], poly[3]];
            if !is_rectangular(&corners, p.angle_tolerance_deg) {
                continue;
            }

            candidates += 1;
            // strictly greater: ties keep the first candidate in scan order
            let candidate_area = polygon_area(&poly);
            match best {
                Some((best_area, _)) if candidate_area <= best_area => {}
                _ => best = Some((candidate_area, corners)),
            }
        }

        match best {
            Some((area, corners)) => {
                log::debug!(
                    "detect: {} candidates, winner area {:.0} px^2",
                    candidates,
                    area
                );
                DetectionResult::Found {
                    quad: order_corners(corners),
                    area,
                }
            }
            None => DetectionResult::NotFound,
        }
    }
}

/// All four interior angles within `tol_deg` of 90 degrees. Rejects
/// slivers and trapezoids with acute corners.
fn is_rectangular(corners: &[Point2<f32>; 4], tol_deg: f64) -> bool {
    interior_angles(corners)
        .iter()
        .all(|&a| (a - 90.0).abs() <= tol_deg)
}
