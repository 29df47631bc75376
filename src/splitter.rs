//! Block splitter: load the scrambled image and cut it into a 3x3 grid

use std::borrow::Cow;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::error::SweepError;
use crate::models::{BlockGrid, IMAGE_SIZE, Raster};

/// Load an image from disk and split it into blocks
///
/// Fails with [`SweepError::InputNotFound`] before touching anything else if
/// `path` does not exist.
pub fn load_block_grid(path: &Path) -> Result<BlockGrid, SweepError> {
    if !path.exists() {
        return Err(SweepError::InputNotFound(path.to_path_buf()));
    }
    println!("Processing image: {}", path.display());
    let image = image::open(path).map_err(|source| SweepError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    split_image(&image)
}

/// Split a decoded image into a 3x3 grid of 11x11 blocks
///
/// Anything other than 33x33 is resampled with Lanczos3 first. This is lossy
/// and can blur module boundaries, so a notice is printed.
pub fn split_image(image: &DynamicImage) -> Result<BlockGrid, SweepError> {
    let (width, height) = image.dimensions();
    let image = if (width, height) != (IMAGE_SIZE, IMAGE_SIZE) {
        println!(
            "Resizing image from ({}, {}) to ({}, {})",
            width, height, IMAGE_SIZE, IMAGE_SIZE
        );
        Cow::Owned(image.resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Lanczos3))
    } else {
        Cow::Borrowed(image)
    };

    let raster = Raster::from_dynamic(&image);
    println!("Image has {} channels", raster.channels());

    BlockGrid::from_raster(&raster).ok_or_else(|| SweepError::invalid_raster(&raster))
}
