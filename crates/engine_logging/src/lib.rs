#![deny(missing_docs)]
//! Shared logging utilities for the life workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the simulation generation of the thread that emitted it.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Generation of the board most recently stepped on this thread.
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Records the generation that the dispatching thread has reached.
///
/// The dispatch loop calls this after each applied input so that log lines
/// emitted while handling the next input carry the right prefix.
pub fn set_generation(generation: u64) {
    GENERATION.with(|v| v.set(generation));
}

/// Generation last recorded on the current thread, 0 if never set.
///
/// Effect bodies run on background threads and therefore always report 0.
pub fn generation() -> u64 {
    GENERATION.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("[gen {}] {}", $crate::generation(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("[gen {}] {}", $crate::generation(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("[gen {}] {}", $crate::generation(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("[gen {}] {}", $crate::generation(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("[gen {}] {}", $crate::generation(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
