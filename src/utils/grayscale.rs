//! Grayscale conversion for candidate rasters
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use crate::models::Raster;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Convert RGB image to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb.chunks_exact(3)
        .take(width * height)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGBA image to grayscale (ignores alpha channel)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgba.chunks_exact(4)
        .take(width * height)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Drop the alpha channel of a luma + alpha image
pub fn luma_alpha_to_grayscale(la: &[u8], width: usize, height: usize) -> Vec<u8> {
    la.chunks_exact(2).take(width * height).map(|px| px[0]).collect()
}

/// Single-channel view of a raster of any supported layout
pub fn raster_to_grayscale(raster: &Raster) -> Vec<u8> {
    let (w, h) = (raster.width() as usize, raster.height() as usize);
    let data = raster.as_bytes();
    match raster.channels() {
        1 => data.to_vec(),
        2 => luma_alpha_to_grayscale(data, w, h),
        3 => rgb_to_grayscale(data, w, h),
        _ => rgba_to_grayscale(data, w, h),
    }
}
