//! `QR_SWEEP_DEBUG` diagnostics for debug builds

use std::fmt;
use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QR_SWEEP_DEBUG").is_ok())
}

pub(crate) fn debug_line(args: fmt::Arguments<'_>) -> String {
    format!("[qrsweep] {}", args)
}

/// Print a diagnostic line to stderr when `QR_SWEEP_DEBUG` is set.
/// Compiled out of release builds.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) && $crate::debug::debug_enabled() {
            eprintln!("{}", $crate::debug::debug_line(format_args!($($arg)*)));
        }
    };
}

pub(crate) use debug_log;
