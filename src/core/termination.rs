//! Process termination after fatal and panic lines
//!
//! Emission methods on [`Logger`](super::Logger) only write. Ending the
//! process is a separate step run by whoever owns that decision: the
//! package-level `fatal*`/`panic*` functions, or callers using
//! [`terminate_after`].

use super::log_level::LogLevel;

/// Exit code used for fatal and panic lines
pub const EXIT_CODE: i32 = 1;

/// Ends the process after a terminal line has been written
pub trait Terminator: Send + Sync {
    /// Called once the line at `level` is fully written
    fn terminate(&self, level: LogLevel);
}

/// Exits the process with a fixed code
#[derive(Debug, Clone, Copy)]
pub struct ProcessExit {
    code: i32,
}

impl ProcessExit {
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl Default for ProcessExit {
    fn default() -> Self {
        Self::new(EXIT_CODE)
    }
}

impl Terminator for ProcessExit {
    fn terminate(&self, _level: LogLevel) {
        std::process::exit(self.code);
    }
}

/// Whether a line at this level ends the process
#[inline]
pub fn is_terminal(level: LogLevel) -> bool {
    matches!(level, LogLevel::Fatal | LogLevel::Panic)
}

/// Run `write`, then hand terminal levels to `terminator`
///
/// # Example
///
/// ```no_run
/// use rust_level_logger::prelude::*;
/// use rust_level_logger::core::termination::{terminate_after, ProcessExit};
///
/// let logger = Logger::builder().build();
/// terminate_after(&ProcessExit::default(), LogLevel::Fatal, || {
///     logger.fatalf(format_args!("config missing: {}", "app.toml"));
/// });
/// ```
pub fn terminate_after<F>(terminator: &dyn Terminator, level: LogLevel, write: F)
where
    F: FnOnce(),
{
    write();
    if is_terminal(level) {
        terminator.terminate(level);
    }
}
