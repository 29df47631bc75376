//! Sweep controller: save every candidate and scan it

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DecodeOptions;
use crate::debug::debug_log;
use crate::decode::decode_candidate;
use crate::error::SweepError;
use crate::models::{Candidate, Raster, ScanResult, SuccessfulScan};

/// Progress line interval, in candidates
const PROGRESS_EVERY: usize = 10;

/// Aggregate outcome of a sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Number of candidates processed
    pub total: usize,
    /// Candidates that decoded, in index order
    pub successes: Vec<SuccessfulScan>,
}

/// File name of candidate `index` inside the output directory
pub fn candidate_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("combination_{}.png", index))
}

/// Encode a raster as PNG at `path`
pub fn save_raster(raster: &Raster, path: &Path) -> Result<(), SweepError> {
    let image = raster
        .to_dynamic()
        .ok_or_else(|| SweepError::invalid_raster(raster))?;
    image.save(path).map_err(|source| SweepError::Save {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn create_dir(path: &Path) -> Result<(), SweepError> {
    fs::create_dir_all(path).map_err(|source| SweepError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist a candidate, then scan it
pub fn scan_candidate(
    candidate: &Candidate,
    output_dir: &Path,
    options: &DecodeOptions,
) -> Result<ScanResult, SweepError> {
    save_raster(&candidate.image, &candidate_path(output_dir, candidate.index))?;
    let content = decode_candidate(&candidate.image, options);
    debug_log!(
        "candidate {} order {:?}: {}",
        candidate.index,
        candidate.order,
        if content.is_some() { "decoded" } else { "no code" }
    );
    Ok(ScanResult {
        index: candidate.index,
        content,
    })
}

/// Save and scan candidates one after another
///
/// Any save failure aborts the whole sweep.
pub fn sweep<I>(candidates: I, output_dir: &Path, options: &DecodeOptions) -> Result<SweepOutcome, SweepError>
where
    I: ExactSizeIterator<Item = Candidate>,
{
    create_dir(output_dir)?;

    let expected = candidates.len();
    println!("Saving and scanning {} combinations...", expected);

    let mut outcome = SweepOutcome::default();
    for candidate in candidates {
        let result = scan_candidate(&candidate, output_dir, options)?;
        outcome.total += 1;
        report_progress(&result, expected);
        if let Some(success) = result.into_success() {
            outcome.successes.push(success);
        }
    }

    print_summary(&outcome);
    Ok(outcome)
}

/// Save and scan candidates on the rayon pool
///
/// Produces the same files and the same success list as [`sweep`]. Only
/// success lines are printed while the pool runs.
#[cfg(feature = "multithreaded")]
pub fn sweep_parallel(
    grid: &crate::models::BlockGrid,
    output_dir: &Path,
    options: &DecodeOptions,
) -> Result<SweepOutcome, SweepError> {
    use crate::combinations::CANDIDATE_COUNT;
    use rayon::prelude::*;

    create_dir(output_dir)?;
    println!("Saving and scanning {} combinations in parallel...", CANDIDATE_COUNT);

    let results = (0..CANDIDATE_COUNT)
        .into_par_iter()
        .filter_map(|index| grid.candidate(index))
        .map(|candidate| -> Result<ScanResult, SweepError> {
            let result = scan_candidate(&candidate, output_dir, options)?;
            if let Some(content) = &result.content {
                println!("✓ Combination {}: QR Code found! Data: {}", result.index, content);
            }
            Ok(result)
        })
        .collect::<Result<Vec<ScanResult>, SweepError>>()?;

    let mut outcome = SweepOutcome {
        total: results.len(),
        successes: results.into_iter().filter_map(ScanResult::into_success).collect(),
    };
    outcome.successes.sort_by_key(|s| s.index);

    print_summary(&outcome);
    Ok(outcome)
}

fn report_progress(result: &ScanResult, expected: usize) {
    match &result.content {
        Some(content) => println!("✓ Combination {}: QR Code found! Data: {}", result.index, content),
        None if result.index % PROGRESS_EVERY == 0 => {
            println!("Processed {}/{} combinations...", result.index, expected)
        }
        None => {}
    }
}

fn print_summary(outcome: &SweepOutcome) {
    println!(
        "\nScan complete: Found {} valid QR codes out of {} combinations",
        outcome.successes.len(),
        outcome.total
    );
}
