//! QR block sweep - brute-force solver for shuffled QR tiles
//!
//! A 33x33 image is cut into a 3x3 grid of 11x11 blocks. The four corner
//! blocks stay where they are; the five others are tried in every one of the
//! 120 possible orders. Each reconstruction is saved, upscaled and handed to
//! a QR scanner, and the ones that decode are reported.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Combination generator (lazy, restartable permutation sequence)
pub mod combinations;
/// Pipeline configuration
pub mod config;
/// Single-candidate QR decode attempt
pub mod decode;
/// Stage-level error kinds
pub mod error;
/// Core data structures (Raster, BlockGrid, Candidate, etc.)
pub mod models;
/// Result reporter (successful images, grid visualisation, summary)
pub mod report;
/// Block splitter (load, resize, cut into blocks)
pub mod splitter;
/// Sweep controller (persist and scan every candidate)
pub mod sweep;
/// Environment knobs and input resolution for the CLI
pub mod tools;
/// Utility functions (grayscale, resampling, file names)
pub mod utils;

mod debug;

pub use combinations::{CANDIDATE_COUNT, Combinations, permutation_at, permutation_index};
pub use config::{DecodeOptions, ReportOptions, SweepConfig};
pub use decode::decode_candidate;
pub use error::SweepError;
pub use models::{BlockGrid, BlockPosition, Candidate, Raster, ScanResult, SuccessfulScan};
pub use report::{ReportFiles, ReportOutcome, write_report};
pub use splitter::{load_block_grid, split_image};
pub use sweep::{SweepOutcome, sweep};

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Sweep totals and successes
    pub sweep: SweepOutcome,
    /// Reporter output
    pub report: ReportOutcome,
}

/// Run the whole pipeline: split, sweep, report
///
/// A missing input fails before the output directory is created.
///
/// # Example
/// ```no_run
/// use qr_block_sweep::{SweepConfig, run};
///
/// let config = SweepConfig::default().with_input("scrambled.png");
/// let summary = run(&config)?;
/// for hit in &summary.sweep.successes {
///     println!("{} -> {}", hit.index, hit.content);
/// }
/// # Ok::<(), qr_block_sweep::SweepError>(())
/// ```
pub fn run(config: &SweepConfig) -> Result<RunSummary, SweepError> {
    let grid = load_block_grid(&config.input)?;
    let sweep = sweep_grid(&grid, config)?;
    let report = write_report(&grid, &sweep, &config.output_dir, &config.report)?;
    Ok(RunSummary { sweep, report })
}

/// Sweep all candidates of `grid`, sequentially or on the rayon pool
pub fn sweep_grid(grid: &BlockGrid, config: &SweepConfig) -> Result<SweepOutcome, SweepError> {
    let combinations = grid.combinations();
    println!("Created {} unique combinations", combinations.len());

    if config.parallel {
        #[cfg(feature = "multithreaded")]
        return sweep::sweep_parallel(grid, &config.output_dir, &config.decode);

        #[cfg(not(feature = "multithreaded"))]
        println!("Parallel sweep unavailable (built without `multithreaded`), scanning sequentially");
    }

    sweep(combinations, &config.output_dir, &config.decode)
}
