//! QR decode attempt for a single candidate

use image::GrayImage;
use rqrr::PreparedImage;

use crate::config::DecodeOptions;
use crate::debug::debug_log;
use crate::models::Raster;
use crate::utils::grayscale::raster_to_grayscale;
use crate::utils::scale::{add_margin, upscale_smooth};

/// Border value used for the quiet margin
const QUIET_VALUE: u8 = 255;

/// Try to read a QR code from a candidate raster
///
/// The raster is reduced to grayscale, enlarged by `options.upscale` with
/// Lanczos3 and padded with a light quiet margin. The result is split into
/// dark and light at `options.threshold` and handed to the scanner once.
/// Returns the text of the first grid that decodes.
pub fn decode_candidate(raster: &Raster, options: &DecodeOptions) -> Option<String> {
    let gray = raster_to_grayscale(raster);
    let gray = GrayImage::from_raw(raster.width(), raster.height(), gray)?;
    let enlarged = upscale_smooth(&gray, options.upscale);
    let padded = add_margin(&enlarged, options.quiet_margin, QUIET_VALUE);

    let (width, height) = padded.dimensions();
    decode_bitmap(padded.as_raw(), width as usize, height as usize, options.threshold)
}

/// Scan a grayscale buffer, treating pixels darker than `threshold` as dark modules
///
/// A fixed cut keeps finder patterns that touch the candidate edge intact.
pub fn decode_bitmap(gray: &[u8], width: usize, height: usize, threshold: u8) -> Option<String> {
    if width == 0 || height == 0 || gray.len() < width * height {
        return None;
    }

    let mut prepared = PreparedImage::prepare_from_bitmap(width, height, |x, y| gray[y * width + x] < threshold);
    let grids = prepared.detect_grids();
    debug_log!("{}x{} image, {} grid(s) detected", width, height, grids.len());

    grids.iter().find_map(|grid| match grid.decode() {
        Ok((_, content)) => Some(content),
        Err(err) => {
            debug_log!("grid failed to decode: {:?}", err);
            None
        }
    })
}
