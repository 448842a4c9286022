//! Core image and geometry types for document boundary detection.
//!
//! This crate is intentionally small: dense pixel containers, bilinear
//! sampling, 4-point homographies with perspective warps, and the
//! canonical corner ordering shared by the detector and the rectifier.
//! It does *not* know about edge maps, contours, or image decoding.

mod homography;
mod image;
mod logger;
mod quad;

pub use homography::{
    homography_from_quad, warp_perspective_gray, warp_perspective_rgb, Homography,
};
pub use image::{
    sample_bilinear, sample_bilinear_rgb, sample_bilinear_u8, GrayImage, GrayImageView, RgbImage,
};
pub use quad::{interior_angles, order_corners, perimeter, polygon_area, Quad};

pub use logger::init_with_level;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;
