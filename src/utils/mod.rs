//! Utility functions for candidate processing
//!
//! This module provides helper functions for the sweep:
//! - Grayscale conversion (RGB/RGBA/LA to luminance)
//! - Resampling (smooth upscale, nearest upscale, quiet margin)
//! - File names (sanitising decoded payloads)

pub mod filename;
pub mod grayscale;
pub mod scale;
