//! End-to-end tests for the block permutation sweep
//!
//! Synthetic QR codes are rendered with the `qrcode` crate, their non-corner
//! blocks are shuffled, and the sweep has to put them back together.

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use qr_block_sweep::models::{BlockGrid, IMAGE_SIZE};
use qr_block_sweep::report::{GRID_FILE, REPORT_FILE, SUCCESS_DIR};
use qr_block_sweep::{
    DecodeOptions, Raster, ReportOutcome, SweepConfig, SweepError, decode_candidate,
    permutation_index, run, split_image, sweep,
};
use qrcode::{Color, EcLevel, QrCode, Version};
use std::path::Path;

const PAYLOAD: &str = "INS{sh1fty_bl0cks}";
const EDGE_PAYLOAD: &str = "INS{v4_no_quiet_zone}";
const QUIET_ZONE: usize = 4;

/// Order applied to the non-corner blocks when scrambling
const SCRAMBLE: [usize; 5] = [3, 0, 4, 2, 1];

/// Render a version 2 QR code (25 modules + 4-module quiet zone = 33) with
/// `module_px` pixels per module.
fn qr_gray(payload: &str, module_px: u32) -> GrayImage {
    let code = QrCode::with_version(payload.as_bytes(), Version::Normal(2), EcLevel::M)
        .expect("payload fits in a version 2 code");
    let width = code.width();
    let colors = code.to_colors();
    let side = (width + 2 * QUIET_ZONE) as u32 * module_px;

    GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / module_px) as usize;
        let my = (y / module_px) as usize;
        let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&mx)
            && (QUIET_ZONE..QUIET_ZONE + width).contains(&my);
        if inside && matches!(colors[(my - QUIET_ZONE) * width + (mx - QUIET_ZONE)], Color::Dark) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Render a version 4 QR code (33 modules, no quiet zone) with `module_px`
/// pixels per module, so every block holds exactly 11x11 modules.
fn qr_edge_gray(payload: &str, module_px: u32) -> GrayImage {
    let code = QrCode::with_version(payload.as_bytes(), Version::Normal(4), EcLevel::L)
        .expect("payload fits in a version 4 code");
    let width = code.width();
    let colors = code.to_colors();
    let side = width as u32 * module_px;

    GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / module_px) as usize;
        let my = (y / module_px) as usize;
        if matches!(colors[my * width + mx], Color::Dark) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

fn gray_raster(image: &GrayImage) -> Raster {
    Raster::from_dynamic(&DynamicImage::ImageLuma8(image.clone()))
}

/// Move non-corner blocks of any square 3x3-tiled raster: slot `k` receives
/// the block from slot `order[k]`.
fn scramble_tiles(raster: &Raster, order: &[usize; 5]) -> Raster {
    let block = raster.width() / 3;
    let slots = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)];
    let mut out = raster.clone();
    for (target, &source) in slots.iter().zip(order) {
        let (sx, sy) = slots[source];
        let tile = raster.crop(sx * block, sy * block, block, block);
        out.blit(&tile, target.0 * block, target.1 * block);
    }
    out
}

/// The ordering that undoes `order`
fn inverse(order: &[usize; 5]) -> [usize; 5] {
    let mut inv = [0; 5];
    for (slot, &source) in order.iter().enumerate() {
        inv[source] = slot;
    }
    inv
}

fn save(raster: &Raster, path: &Path) {
    raster.to_dynamic().unwrap().save(path).unwrap();
}

#[test]
fn test_unscrambled_code_decodes() {
    let raster = gray_raster(&qr_gray(PAYLOAD, 1));
    assert_eq!((raster.width(), raster.height()), (IMAGE_SIZE, IMAGE_SIZE));
    assert_eq!(
        decode_candidate(&raster, &DecodeOptions::default()).as_deref(),
        Some(PAYLOAD)
    );
}

#[test]
fn test_sweep_recovers_scrambled_code() {
    let original = gray_raster(&qr_gray(PAYLOAD, 1));
    let grid = BlockGrid::from_raster(&scramble_tiles(&original, &SCRAMBLE)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let outcome = sweep(grid.combinations(), dir.path(), &DecodeOptions::default()).unwrap();
    assert_eq!(outcome.total, 120);

    let restoring = grid
        .combinations()
        .find(|c| c.image == original)
        .expect("one candidate restores the original layout");
    assert_eq!(restoring.order, inverse(&SCRAMBLE));

    let hit = outcome
        .successes
        .iter()
        .find(|s| s.index == restoring.index)
        .expect("restoring candidate decodes");
    assert_eq!(hit.content, PAYLOAD);
}

#[test]
fn test_sweep_recovers_edge_to_edge_code() {
    let original = gray_raster(&qr_edge_gray(EDGE_PAYLOAD, 1));
    assert_eq!((original.width(), original.height()), (IMAGE_SIZE, IMAGE_SIZE));
    let grid = BlockGrid::from_raster(&scramble_tiles(&original, &SCRAMBLE)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let outcome = sweep(grid.combinations(), dir.path(), &DecodeOptions::default()).unwrap();

    let wanted = permutation_index(&inverse(&SCRAMBLE)).unwrap();
    assert_eq!(wanted, 46);
    assert_eq!(grid.candidate(wanted).unwrap().image, original);

    let hit = outcome
        .successes
        .iter()
        .find(|s| s.index == wanted)
        .expect("restoring candidate decodes");
    assert_eq!(hit.content, EDGE_PAYLOAD);
}

#[test]
fn test_sweep_is_deterministic() {
    let original = gray_raster(&qr_gray(PAYLOAD, 1));
    let grid = BlockGrid::from_raster(&scramble_tiles(&original, &SCRAMBLE)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let first = sweep(grid.combinations(), dir.path(), &DecodeOptions::default()).unwrap();
    let second = sweep(grid.combinations(), dir.path(), &DecodeOptions::default()).unwrap();
    assert!(!first.successes.is_empty());
    assert_eq!(first, second);
}

#[cfg(feature = "multithreaded")]
#[test]
fn test_parallel_sweep_matches_sequential() {
    let original = gray_raster(&qr_gray(PAYLOAD, 1));
    let grid = BlockGrid::from_raster(&scramble_tiles(&original, &SCRAMBLE)).unwrap();
    let seq_dir = tempfile::tempdir().unwrap();
    let par_dir = tempfile::tempdir().unwrap();

    let sequential = sweep(grid.combinations(), seq_dir.path(), &DecodeOptions::default()).unwrap();
    let parallel =
        qr_block_sweep::sweep::sweep_parallel(&grid, par_dir.path(), &DecodeOptions::default()).unwrap();
    assert_eq!(sequential, parallel);
    assert!(par_dir.path().join("combination_119.png").exists());
}

#[test]
fn test_downscaled_99px_code_recovers_payload() {
    // 3 pixels per module, shuffled in 33x33 tiles, then shrunk by the splitter
    let large = gray_raster(&qr_gray(PAYLOAD, 3));
    assert_eq!(large.width(), 99);
    let scrambled = scramble_tiles(&large, &SCRAMBLE);

    let grid = split_image(&scrambled.to_dynamic().unwrap()).unwrap();
    let wanted = permutation_index(&inverse(&SCRAMBLE)).unwrap();
    let candidate = grid.candidate(wanted).unwrap();

    assert_eq!(
        decode_candidate(&candidate.image, &DecodeOptions::default()).as_deref(),
        Some(PAYLOAD)
    );
}

#[test]
fn test_downscaled_99px_edge_to_edge_code_recovers_payload() {
    // 3 pixels per module, each 33x33 tile holds 11x11 modules
    let large = gray_raster(&qr_edge_gray(EDGE_PAYLOAD, 3));
    assert_eq!(large.width(), 99);
    let scrambled = scramble_tiles(&large, &SCRAMBLE);

    let grid = split_image(&scrambled.to_dynamic().unwrap()).unwrap();
    let wanted = permutation_index(&inverse(&SCRAMBLE)).unwrap();
    let candidate = grid.candidate(wanted).unwrap();

    assert_eq!(
        decode_candidate(&candidate.image, &DecodeOptions::default()).as_deref(),
        Some(EDGE_PAYLOAD)
    );
}

#[test]
fn test_color_input_is_scanned_in_grayscale() {
    let gray = qr_gray(PAYLOAD, 1);
    let color = RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] == 0 {
            image::Rgb([20, 30, 120])
        } else {
            image::Rgb([250, 240, 200])
        }
    });
    let scrambled = scramble_tiles(&Raster::from_dynamic(&DynamicImage::ImageRgb8(color)), &SCRAMBLE);

    let grid = split_image(&scrambled.to_dynamic().unwrap()).unwrap();
    assert_eq!(grid.channels(), 3);
    let wanted = permutation_index(&inverse(&SCRAMBLE)).unwrap();
    let candidate = grid.candidate(wanted).unwrap();
    assert_eq!(
        decode_candidate(&candidate.image, &DecodeOptions::default()).as_deref(),
        Some(PAYLOAD)
    );
}

#[test]
fn test_run_writes_report_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scrambled.png");
    let output = dir.path().join("qr_combinations");
    save(&scramble_tiles(&gray_raster(&qr_gray(PAYLOAD, 1)), &SCRAMBLE), &input);

    let config = SweepConfig::default().with_input(&input).with_output_dir(&output);
    let summary = run(&config).unwrap();

    for index in 0..120 {
        assert!(output.join(format!("combination_{}.png", index)).exists());
    }

    let files = match summary.report {
        ReportOutcome::Written(files) => files,
        ReportOutcome::NoSuccesses => panic!("expected at least one decoded candidate"),
    };
    assert_eq!(files.successful_dir, output.join(SUCCESS_DIR));
    assert_eq!(files.grid_path, output.join(GRID_FILE));
    assert!(files.grid_path.exists());

    let wanted = permutation_index(&inverse(&SCRAMBLE)).unwrap();
    let expected_file = output
        .join(SUCCESS_DIR)
        .join(format!("successful_{}_{}.png", wanted, PAYLOAD));
    assert!(files.saved.contains(&expected_file));
    assert!(expected_file.exists());

    let report = std::fs::read_to_string(output.join(REPORT_FILE)).unwrap();
    assert!(report.starts_with("QR Code Scan Results\n"));
    assert!(report.contains("Total combinations: 120\n"));
    assert!(report.contains(&format!(
        "Successful scans: {}\n",
        summary.sweep.successes.len()
    )));
    assert!(report.contains(&format!("- Combination #{}: {}\n", wanted, PAYLOAD)));
}

#[test]
fn test_missing_input_leaves_no_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("qr_combinations");
    let config = SweepConfig::default()
        .with_input(dir.path().join("file.png"))
        .with_output_dir(&output);

    assert!(matches!(run(&config), Err(SweepError::InputNotFound(_))));
    assert!(!output.exists());
}
