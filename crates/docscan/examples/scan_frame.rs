//! Scan a single frame from disk: decode, preview-detect, rectify.
//!
//! Usage: `cargo run --example scan_frame -- input.jpg [output.png]`
//!
//! In a camera app the preview detection runs in a worker loop that
//! always pulls the *latest* frame and drops the ones that arrived
//! while a detection was in flight; this example just runs both passes
//! once on a still image.

use docscan::{DetectionResult, PipelineConfig, ScanPipeline};
use log::{info, warn, LevelFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    docscan::core::init_with_level(LevelFilter::Info)?;

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("usage: scan_frame <input> [output]")?;
    let output = args.next().unwrap_or_else(|| "scan.png".to_string());

    let pipeline = ScanPipeline::new(PipelineConfig::default())?;

    let bytes = std::fs::read(&input)?;
    let frame = pipeline.decode_frame(&bytes)?;
    info!("decoded {} ({}x{})", input, frame.width, frame.height);

    match pipeline.detect_preview(&frame) {
        DetectionResult::Found { quad, area } => {
            info!("preview boundary: {:?}, {:.0} px^2", quad.corners(), area);
        }
        DetectionResult::NotFound => info!("preview pass: no document"),
    }

    match pipeline.rectify(&frame) {
        Ok(scan) => {
            let buf = image::RgbImage::from_raw(
                scan.width as u32,
                scan.height as u32,
                scan.data,
            )
            .ok_or("scan buffer mismatch")?;
            buf.save(&output)?;
            info!("wrote {output}");
        }
        Err(e) => {
            // the app-level fallback: keep the uncorrected capture
            warn!("rectification failed ({e}), keeping the original frame");
            std::fs::copy(&input, &output)?;
        }
    }

    Ok(())
}
