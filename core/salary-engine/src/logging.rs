//! FILENAME: core/salary-engine/src/logging.rs
// PURPOSE: Category-tagged logging shared by the engine crates.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use log::Level as LogLevel;

// ============================================================================
// SEQUENCED LOG LINES
// ============================================================================

/// Global sequence counter so interleaved lines from both engines can be
/// put back in order.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Write a log line in the `seq|category|message` format.
/// The category doubles as the `log` target, so consumers can filter on it.
pub fn write_log(level: LogLevel, category: &str, message: fmt::Arguments<'_>) {
    if !log::log_enabled!(target: category, level) {
        return;
    }
    let seq = next_seq();
    log::log!(target: category, level, "{}|{}|{}", seq, category, message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Debug, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Info, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::LogLevel::Warn, $cat, format_args!($($arg)*))
    };
}

pub use crate::{log_debug, log_info, log_warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_macros_without_logger_are_silent() {
        // No logger installed: these must be no-ops, not panics.
        log_debug!("TEST", "debug {}", 1);
        log_info!("TEST", "info {}", 2);
        log_warn!("TEST", "warn {}", 3);
    }
}
