//! Logging setup shared by the sitewise crates
//!
//! Usage:
//! - Set SITEWISE_LOG=off (default) - no logs
//! - Set SITEWISE_LOG=info - fetches and resolved frames
//! - Set SITEWISE_LOG=debug - per-column resolution detail

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable holding the minimum log level
pub const LOG_ENV: &str = "SITEWISE_LOG";

static INIT: Once = Once::new();

/// Parse a level name as accepted in `SITEWISE_LOG`.
///
/// Returns `Ok(None)` for "off", and `Err(name)` for anything unrecognized.
pub fn parse_level(name: &str) -> Result<Option<emit::Level>, String> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" | "" => Ok(None),
        "debug" => Ok(Some(emit::Level::Debug)),
        "info" => Ok(Some(emit::Level::Info)),
        "warn" => Ok(Some(emit::Level::Warn)),
        "error" => Ok(Some(emit::Level::Error)),
        other => Err(other.to_string()),
    }
}

/// Initialize diagnostics based on the SITEWISE_LOG environment variable
///
/// Safe to call multiple times; only the first call installs the emitter.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let (level, unknown) = match parse_level(&log_level) {
            Ok(None) => return,
            Ok(Some(level)) => (level, None),
            Err(name) => (emit::Level::Info, Some(name)),
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if let Some(name) = unknown {
            emit::warn!("Unknown SITEWISE_LOG value {name}, using info", name: name);
        }

        // The runtime must outlive every emitting thread.
        std::mem::forget(rt);
    });
}

/// Log basic operations (fetches, resolved frames)
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (column decisions, fallbacks, cache hits)
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems (failed lookups surfaced to the caller)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log critical error conditions
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
