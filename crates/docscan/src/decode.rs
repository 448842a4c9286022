//! Frame decoding: encoded camera bytes into an owned RGB grid.
//!
//! Pure format conversion, no detection logic. Malformed input fails
//! closed with [`DecodeError`], which callers keep distinct from the
//! detector's `NotFound`: a decode failure means the capture path is
//! broken upstream, not that no document is visible.

use docscan_core::RgbImage;

/// The frame buffer could not be interpreted as an image.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("frame bytes are not a decodable image")]
    Malformed(#[from] ::image::ImageError),
    #[error("decoded frame has zero pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
}

/// Decode an encoded still/video frame (any format the `image` crate
/// recognizes) into an interleaved RGB grid.
pub fn decode_frame(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let decoded = ::image::load_from_memory(bytes)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyFrame { width, height });
    }
    Ok(RgbImage {
        width: width as usize,
        height: height as usize,
        data: rgb.into_raw(),
    })
}
