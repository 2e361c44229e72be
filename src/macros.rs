//! Logging macros for ergonomic log message formatting.
//!
//! The level macros build `format_args!` from a format string and pass it
//! to the formatted shape of the logger. [`log_values!`] drives the
//! positional shape. Any expression with the logger's methods works as the
//! first argument, including [`global::default_logger()`].
//!
//! [`global::default_logger()`]: crate::global::default_logger
//!
//! # Examples
//!
//! ```
//! use rust_level_logger::prelude::*;
//! use rust_level_logger::{info, log_values};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::new(buffer.clone(), "", LogFlags::NONE);
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! log_values!(logger, LogLevel::Warn, "disk", "full");
//!
//! assert_eq!(buffer.lines(), vec!["[INFO] Server listening on port 8080", "[WARN] disk full"]);
//! ```

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_level_logger::prelude::*;
/// # let logger = Logger::new(std::io::sink(), "", LogFlags::NONE);
/// use rust_level_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, ::std::format_args!($($arg)+))
    };
}

/// Log space-joined values at the given level.
///
/// # Examples
///
/// ```
/// # use rust_level_logger::prelude::*;
/// # let logger = Logger::new(std::io::sink(), "", LogFlags::NONE);
/// use rust_level_logger::log_values;
/// log_values!(logger, LogLevel::Info, "user", 42, "logged in");
/// ```
#[macro_export]
macro_rules! log_values {
    ($logger:expr, $level:expr $(, $value:expr)* $(,)?) => {
        $logger.log_values($level, &[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_level_logger::prelude::*;
/// # let logger = Logger::new(std::io::sink(), "", LogFlags::NONE);
/// use rust_level_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a panic-level message. Neither unwinds nor exits.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Panic, $($arg)+)
    };
}
