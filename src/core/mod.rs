//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod error;
pub mod flags;
pub mod header;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod termination;
pub mod timestamp;

pub use caller::{CallSite, CallerResolver, StackResolver};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use flags::LogFlags;
pub use log_level::{parse_level, LogLevel};
pub use logger::{Logger, LoggerBuilder, Sink, DEFAULT_CALL_DEPTH};
pub use metrics::LoggerMetrics;
pub use termination::{ProcessExit, Terminator};
pub use timestamp::{Clock, FixedClock, SystemClock};
