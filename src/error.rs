use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Raster;

/// Failures at each stage boundary of the sweep
///
/// A candidate that does not decode is not an error; see
/// [`ScanResult`](crate::models::ScanResult).
#[derive(Debug, Error)]
pub enum SweepError {
    /// The source image path does not exist
    #[error("file '{}' not found", .0.display())]
    InputNotFound(PathBuf),
    /// The source image exists but could not be decoded
    #[error("failed to load image '{}'", path.display())]
    Load {
        /// Offending path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: image::ImageError,
    },
    /// A raster does not have the shape a stage expects
    #[error("invalid raster: {width}x{height} with {channels} channels")]
    InvalidRaster {
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
        /// Raster channel count
        channels: u8,
    },
    /// An output directory could not be created
    #[error("failed to create directory '{}'", path.display())]
    CreateDir {
        /// Offending path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },
    /// An image could not be written
    #[error("failed to save image '{}'", path.display())]
    Save {
        /// Offending path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: image::ImageError,
    },
    /// The text report could not be written
    #[error("failed to write report '{}'", path.display())]
    Report {
        /// Offending path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },
}

impl SweepError {
    pub(crate) fn invalid_raster(raster: &Raster) -> Self {
        SweepError::InvalidRaster {
            width: raster.width(),
            height: raster.height(),
            channels: raster.channels(),
        }
    }
}
