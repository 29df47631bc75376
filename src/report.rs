//! Result reporter: successful images, grid visualisation and text summary

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage, imageops};

use crate::config::ReportOptions;
use crate::error::SweepError;
use crate::models::{BlockGrid, IMAGE_SIZE, SuccessfulScan};
use crate::sweep::{SweepOutcome, create_dir, save_raster};
use crate::utils::filename::sanitize_component;
use crate::utils::scale::upscale_nearest;

/// Subdirectory receiving the successful candidates
pub const SUCCESS_DIR: &str = "successful";
/// Grid visualisation file name
pub const GRID_FILE: &str = "successful_grid.png";
/// Text summary file name
pub const REPORT_FILE: &str = "qr_scan_results.txt";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Files written by the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    /// `<output>/successful`
    pub successful_dir: PathBuf,
    /// One image per success shown in the grid
    pub saved: Vec<PathBuf>,
    /// `<output>/successful_grid.png`
    pub grid_path: PathBuf,
    /// `<output>/qr_scan_results.txt`
    pub report_path: PathBuf,
}

/// What the reporter did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Nothing decoded, nothing written
    NoSuccesses,
    /// Report files were written
    Written(ReportFiles),
}

/// Rows and columns of the grid for `count` successes
///
/// Rows fill first: `rows = min(side, count)`, then
/// `cols = min(side, ceil(count / rows))`.
pub fn grid_layout(count: usize, max_side: usize) -> (usize, usize) {
    if count == 0 || max_side == 0 {
        return (0, 0);
    }
    let rows = count.min(max_side);
    let cols = count.div_ceil(rows).min(max_side);
    (rows, cols)
}

/// Path of a successful candidate with its decoded text embedded
pub fn successful_path(dir: &Path, scan: &SuccessfulScan) -> PathBuf {
    dir.join(format!(
        "successful_{}_{}.png",
        scan.index,
        sanitize_component(&scan.content)
    ))
}

/// Plain-text summary of a sweep
pub fn render_report(total: usize, successes: &[SuccessfulScan]) -> String {
    let mut out = format!(
        "QR Code Scan Results\n====================\n\nTotal combinations: {}\nSuccessful scans: {}\n\nDetails:\n",
        total,
        successes.len()
    );
    for scan in successes {
        out.push_str(&format!("- Combination #{}: {}\n", scan.index, scan.content));
    }
    out
}

/// Write the successful candidates, the grid image and the text report
///
/// Candidates are regenerated from `grid` by index. With no successes a
/// notice is printed and nothing is written.
pub fn write_report(
    grid: &BlockGrid,
    outcome: &SweepOutcome,
    output_dir: &Path,
    options: &ReportOptions,
) -> Result<ReportOutcome, SweepError> {
    if outcome.successes.is_empty() {
        println!("No successful QR code scans to display.");
        return Ok(ReportOutcome::NoSuccesses);
    }

    let successful_dir = output_dir.join(SUCCESS_DIR);
    create_dir(&successful_dir)?;

    let (rows, cols) = grid_layout(outcome.successes.len(), options.max_grid_side);
    let mut saved = Vec::new();
    let mut cells = Vec::new();
    for scan in outcome.successes.iter().take(rows * cols) {
        let Some(candidate) = grid.candidate(scan.index) else {
            continue;
        };
        let path = successful_path(&successful_dir, scan);
        save_raster(&candidate.image, &path)?;
        saved.push(path);

        let image = candidate
            .image
            .to_dynamic()
            .ok_or_else(|| SweepError::invalid_raster(&candidate.image))?;
        cells.push(image.to_rgba8());
    }

    let grid_path = output_dir.join(GRID_FILE);
    let canvas = render_grid(&cells, rows, cols, options.cell_scale);
    canvas.save(&grid_path).map_err(|source| SweepError::Save {
        path: grid_path.clone(),
        source,
    })?;

    let report_path = output_dir.join(REPORT_FILE);
    fs::write(&report_path, render_report(outcome.total, &outcome.successes)).map_err(|source| {
        SweepError::Report {
            path: report_path.clone(),
            source,
        }
    })?;

    println!("Successful combinations saved to {}", successful_dir.display());
    println!("Results summary saved to {}", report_path.display());

    Ok(ReportOutcome::Written(ReportFiles {
        successful_dir,
        saved,
        grid_path,
        report_path,
    }))
}

/// Lay out candidates row by row on a light canvas
fn render_grid(cells: &[RgbaImage], rows: usize, cols: usize, cell_scale: u32) -> RgbaImage {
    let scale = cell_scale.max(1);
    let cell = IMAGE_SIZE * scale;
    let gutter = 2 * scale;
    let width = cols as u32 * cell + (cols as u32 + 1) * gutter;
    let height = rows as u32 * cell + (rows as u32 + 1) * gutter;

    let mut canvas = RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND);
    for (i, image) in cells.iter().take(rows * cols).enumerate() {
        let row = (i / cols) as u32;
        let col = (i % cols) as u32;
        let x = gutter + col * (cell + gutter);
        let y = gutter + row * (cell + gutter);
        let enlarged = upscale_nearest(image, scale);
        imageops::replace(&mut canvas, &enlarged, x as i64, y as i64);
    }
    canvas
}
