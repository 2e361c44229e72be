//! # Rust Level Logger
//!
//! A leveled, thread-safe logger. Each [`Logger`] writes complete lines to
//! one byte sink under a single lock, with a fixed header layout:
//!
//! ```text
//! 2024-05-17 09:04:02 [WARN] disk/monitor.rs:88: svc: disk full
//! ```
//!
//! ## Features
//!
//! - **Level ceiling**: Panic < Fatal < Error < Warn < Info < Debug; calls
//!   more verbose than the ceiling return before any formatting
//! - **Two call shapes**: format strings (`infof`, `info!`) and
//!   space-joined values (`info`, `log_values!`)
//! - **Caller location**: `#[track_caller]` call sites, with a call depth
//!   for untracked wrapper layers
//! - **Default logger**: a replaceable process-wide instance in [`global`]

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        parse_level, CallSite, CallerResolver, Clock, FixedClock, LogFlags, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, ProcessExit, Result, Sink,
        SystemClock, Terminator, StackResolver, DEFAULT_CALL_DEPTH,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, SharedBuffer};
}

pub use crate::core::{
    parse_level, CallSite, CallerResolver, Clock, FixedClock, LogFlags, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, ProcessExit, Result, Sink,
    SystemClock, Terminator, StackResolver, DEFAULT_CALL_DEPTH,
};
pub use global::{default_logger, set_default_logger, set_terminator};
pub use sinks::{ConsoleSink, FileSink, SharedBuffer};
