//! Logging abstraction
//!
//! Unified logging macros on top of the `log` facade:
//! - Library code logs through `crate::log_*!` and never picks a backend
//! - Binaries call [`init`] once to install `env_logger` on stderr
//!
//! The verbose flag of the command line tool maps to the `Debug` level, which
//! traces every register access. `RUST_LOG` still takes precedence.

#[doc(hidden)]
pub use log as __log;

/// Install `env_logger` on stderr
///
/// `verbose` selects `debug` as the default filter instead of `info`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    )
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Level filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::info!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::warn!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::error!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::debug!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::core::logging::__log::trace!($($arg)*);
    }};
}
