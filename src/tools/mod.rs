//! Environment knobs and input resolution for the CLI
//!
//! Every knob is optional; unset or unparsable values fall back to the
//! [`SweepConfig`](crate::SweepConfig) defaults.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crate::config::MAX_UPSCALE;

/// Output directory override from `QR_SWEEP_OUTPUT`.
pub fn output_dir_from_env() -> Option<PathBuf> {
    match env::var("QR_SWEEP_OUTPUT") {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value.trim())),
        _ => None,
    }
}

/// Upscale factor override from `QR_SWEEP_UPSCALE`.
pub fn upscale_from_env() -> Option<u32> {
    env::var("QR_SWEEP_UPSCALE")
        .ok()
        .and_then(|value| parse_upscale(&value))
}

/// Parallel sweep flag from `QR_SWEEP_PARALLEL`.
pub fn parallel_from_env() -> bool {
    env::var("QR_SWEEP_PARALLEL")
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

/// Parse an upscale factor in `1..=MAX_UPSCALE`; anything else is ignored.
pub fn parse_upscale(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(v) if (1..=MAX_UPSCALE).contains(&v) => Some(v),
        _ => None,
    }
}

/// Interpret a boolean-ish environment value.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}

/// Pick the source image path.
///
/// An explicit argument wins. Otherwise an interactive user is asked for a
/// path, and an empty answer or a non-interactive stdin falls back to
/// `default`.
pub fn resolve_input_path(arg: Option<PathBuf>, default: &Path) -> PathBuf {
    if let Some(path) = arg {
        return path;
    }

    println!("No image path provided. Please enter the path to your image:");
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return default.to_path_buf();
    }
    let _ = io::stdout().flush();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(_) => answer_or_default(&line, default),
        Err(_) => default.to_path_buf(),
    }
}

fn answer_or_default(answer: &str, default: &Path) -> PathBuf {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}
