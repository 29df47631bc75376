use std::path::PathBuf;

use crate::tools::{output_dir_from_env, parallel_from_env, upscale_from_env};

/// Source image used when none is given
pub const DEFAULT_INPUT: &str = "file.png";
/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "qr_combinations";

/// Largest accepted upscale factor
pub const MAX_UPSCALE: u32 = 32;

/// Settings for a single decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Linear upscale factor applied before scanning (33 -> 99 at 3)
    pub upscale: u32,
    /// Light border, in upscaled pixels, added around the candidate
    pub quiet_margin: u32,
    /// Gray level below which an upscaled pixel counts as a dark module
    pub threshold: u8,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            upscale: 3,
            quiet_margin: 12,
            threshold: 128,
        }
    }
}

/// Settings for the successful-candidate visualisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Nearest-neighbour scale applied to each candidate in the grid image
    pub cell_scale: u32,
    /// Maximum rows and columns of the grid image
    pub max_grid_side: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            cell_scale: 8,
            max_grid_side: 4,
        }
    }
}

/// Everything the pipeline entry point needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Scrambled source image
    pub input: PathBuf,
    /// Directory receiving candidates, the grid image and the report
    pub output_dir: PathBuf,
    /// Decode attempt settings
    pub decode: DecodeOptions,
    /// Reporter settings
    pub report: ReportOptions,
    /// Save and scan candidates on the rayon pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            decode: DecodeOptions::default(),
            report: ReportOptions::default(),
            parallel: false,
        }
    }
}

impl SweepConfig {
    /// Defaults overlaid with `QR_SWEEP_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = output_dir_from_env() {
            config.output_dir = dir;
        }
        if let Some(factor) = upscale_from_env() {
            config.decode.upscale = factor;
        }
        config.parallel = parallel_from_env();
        config
    }

    /// Replace the source image path
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Replace the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Enable or disable the parallel sweep
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
