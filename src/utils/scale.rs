//! Resampling helpers for the decode attempt and the grid visualisation

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};

/// Target size for an integer upscale, or `None` when the factor is 0, 1 or
/// would overflow `u32`
fn scaled_size((width, height): (u32, u32), factor: u32) -> Option<(u32, u32)> {
    if factor <= 1 {
        return None;
    }
    Some((width.checked_mul(factor)?, height.checked_mul(factor)?))
}

/// Enlarge a grayscale image by an integer factor with Lanczos3 resampling
///
/// A factor of 0 or 1, or one whose result does not fit in `u32`, returns
/// an unchanged copy.
pub fn upscale_smooth(image: &GrayImage, factor: u32) -> GrayImage {
    match scaled_size(image.dimensions(), factor) {
        Some((width, height)) => imageops::resize(image, width, height, FilterType::Lanczos3),
        None => image.clone(),
    }
}

/// Enlarge an RGBA image by an integer factor, keeping hard pixel edges
pub fn upscale_nearest(image: &RgbaImage, factor: u32) -> RgbaImage {
    match scaled_size(image.dimensions(), factor) {
        Some((width, height)) => imageops::resize(image, width, height, FilterType::Nearest),
        None => image.clone(),
    }
}

/// Surround a grayscale image with a uniform border `margin` pixels wide
pub fn add_margin(image: &GrayImage, margin: u32, value: u8) -> GrayImage {
    if margin == 0 {
        return image.clone();
    }
    let mut out = GrayImage::from_pixel(
        image.width() + 2 * margin,
        image.height() + 2 * margin,
        Luma([value]),
    );
    imageops::replace(&mut out, image, margin as i64, margin as i64);
    out
}
