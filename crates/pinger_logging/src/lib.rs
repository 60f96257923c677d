#![deny(missing_docs)]
//! Shared logging utilities for the pinger workspace.
//!
//! This crate provides the `pinger_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Messages logged from
//! a probe worker are prefixed with the run they belong to.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Run id of the probe worker executing on this thread, if any.
    static RUN_ID: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Tags every message logged from the current thread with `run_id`.
/// Probe workers call this once when they start.
pub fn set_run_id(run_id: u64) {
    RUN_ID.with(|v| v.set(Some(run_id)));
}

/// Removes the run tag from the current thread.
pub fn clear_run_id() {
    RUN_ID.with(|v| v.set(None));
}

/// Retrieves the run id tagged on the current thread.
/// Returns `None` outside a probe worker.
pub fn current_run_id() -> Option<u64> {
    RUN_ID.with(|v| v.get())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __pinger_log {
    ($lvl:expr, $($arg:tt)*) => {{
        match $crate::current_run_id() {
            Some(run_id) => {
                $crate::log::log!($lvl, "[run {}] {}", run_id, format_args!($($arg)*))
            }
            None => $crate::log::log!($lvl, $($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! pinger_trace {
    ($($arg:tt)*) => {
        $crate::__pinger_log!($crate::log::Level::Trace, $($arg)*)
    };
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! pinger_debug {
    ($($arg:tt)*) => {
        $crate::__pinger_log!($crate::log::Level::Debug, $($arg)*)
    };
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! pinger_info {
    ($($arg:tt)*) => {
        $crate::__pinger_log!($crate::log::Level::Info, $($arg)*)
    };
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! pinger_warn {
    ($($arg:tt)*) => {
        $crate::__pinger_log!($crate::log::Level::Warn, $($arg)*)
    };
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! pinger_error {
    ($($arg:tt)*) => {
        $crate::__pinger_log!($crate::log::Level::Error, $($arg)*)
    };
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
