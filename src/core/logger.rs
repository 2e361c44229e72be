//! Main logger implementation
//!
//! A [`Logger`] owns its configuration, its output sink and a scratch
//! buffer behind one mutex. Each emission call holds that mutex from the
//! level check through the sink write, so lines from one logger never
//! interleave and configuration changes never tear a line.
//!
//! # Caveats
//!
//! - Sink writes are synchronous. A sink that blocks stalls the calling
//!   thread, and every other thread logging through the same logger,
//!   with no timeout.
//! - Two loggers sharing one sink are not ordered against each other.
//!   Each line is still written with a single `write_all`, but whether
//!   that is atomic on the sink is up to the sink.
//! - Logging through a logger from inside a `Display` impl that the same
//!   logger is formatting deadlocks.

use super::{
    caller::{CallerResolver, StackResolver},
    error::{LoggerError, Result},
    flags::LogFlags,
    header::write_header,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    timestamp::{Clock, SystemClock},
};
use crate::sinks::ConsoleSink;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Call depth of a freshly built logger
pub const DEFAULT_CALL_DEPTH: usize = 1;

/// Sink write failures between two stderr alerts
const FAILURE_ALERT_INTERVAL: u64 = 1000;

/// Output sink of a logger
pub type Sink = Box<dyn Write + Send>;

struct LoggerState {
    level: LogLevel,
    flags: LogFlags,
    prefix: String,
    out: Sink,
    call_depth: usize,
    resolver: Arc<dyn CallerResolver>,
    clock: Arc<dyn Clock>,
    /// Reused across calls, cleared before every line
    buf: Vec<u8>,
}

/// Message body of one call
enum Body<'a> {
    /// Rendered from a format string and its arguments
    Formatted(fmt::Arguments<'a>),
    /// Values joined by single spaces, newline-terminated
    Values(&'a [&'a dyn fmt::Display]),
}

impl Body<'_> {
    fn write_to(&self, buf: &mut Vec<u8>) {
        // Writing into a Vec only fails if a Display impl reports an error
        match self {
            Body::Formatted(args) => {
                let _ = buf.write_fmt(*args);
            }
            Body::Values(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        buf.push(b' ');
                    }
                    let _ = write!(buf, "{}", value);
                }
                buf.push(b'\n');
            }
        }
    }
}

/// Leveled logger writing whole lines to one sink
///
/// Shareable across threads behind an `Arc`; every method takes `&self`.
pub struct Logger {
    state: Mutex<LoggerState>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger writing to `out`
    ///
    /// The level starts at [`LogLevel::Info`] and the call depth at
    /// [`DEFAULT_CALL_DEPTH`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_level_logger::prelude::*;
    ///
    /// let buffer = SharedBuffer::new();
    /// let logger = Logger::new(buffer.clone(), "svc: ", LogFlags::NONE);
    /// logger.warn(&[&"disk", &"full"]);
    ///
    /// assert_eq!(buffer.contents(), "[WARN] svc: disk full\n");
    /// ```
    #[must_use]
    pub fn new(out: impl Write + Send + 'static, prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self::from_parts(
            Box::new(out),
            prefix.into(),
            flags,
            LogLevel::Info,
            DEFAULT_CALL_DEPTH,
            Arc::new(StackResolver),
            Arc::new(SystemClock),
        )
    }

    fn from_parts(
        out: Sink,
        prefix: String,
        flags: LogFlags,
        level: LogLevel,
        call_depth: usize,
        resolver: Arc<dyn CallerResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                level,
                flags,
                prefix,
                out,
                call_depth,
                resolver,
                clock,
                buf: Vec::with_capacity(256),
            }),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_level_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .flags(LogFlags::DATETIME)
    ///     .prefix("worker: ")
    ///     .output(std::io::sink())
    ///     .build();
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // Configuration

    /// Replace the header flags. Unknown bits are stored and ignored.
    pub fn set_flags(&self, flags: LogFlags) {
        self.state.lock().flags = flags;
    }

    /// Replace the verbosity ceiling
    pub fn set_level(&self, level: LogLevel) {
        self.state.lock().level = level;
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.state.lock().prefix = prefix.into();
    }

    /// Replace the sink. Calls starting after this returns write to `out`.
    pub fn set_output(&self, out: impl Write + Send + 'static) {
        let out: Sink = Box::new(out);
        // Drop the previous sink outside the lock
        let _previous = std::mem::replace(&mut self.state.lock().out, out);
    }

    /// Set how many frames out from the call site the reported location is
    ///
    /// 1 is the call site itself; add one per untracked wrapper layer.
    pub fn set_call_depth(&self, depth: usize) {
        self.state.lock().call_depth = depth;
    }

    pub fn set_caller_resolver(&self, resolver: Arc<dyn CallerResolver>) {
        self.state.lock().resolver = resolver;
    }

    pub fn set_clock(&self, clock: Arc<dyn Clock>) {
        self.state.lock().clock = clock;
    }

    pub fn level(&self) -> LogLevel {
        self.state.lock().level
    }

    pub fn flags(&self) -> LogFlags {
        self.state.lock().flags
    }

    pub fn prefix(&self) -> String {
        self.state.lock().prefix.clone()
    }

    pub fn call_depth(&self) -> usize {
        self.state.lock().call_depth
    }

    /// Whether a call at `level` would currently be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_for(self.level())
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use rust_level_logger::prelude::*;
    ///
    /// let logger = Logger::new(std::io::sink(), "", LogFlags::NONE);
    /// logger.info(&[&"kept"]);
    /// logger.debug(&[&"filtered"]);
    ///
    /// assert_eq!(logger.metrics().lines_written(), 1);
    /// assert_eq!(logger.metrics().lines_filtered(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.state.lock().out.flush()?;
        Ok(())
    }

    // Generic entry points

    /// Write a formatted message at `level`
    ///
    /// Sink errors are counted in [`LoggerMetrics::write_failures`] and
    /// otherwise dropped. Use [`Logger::try_log_fmt`] to observe them.
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let _ = self.emit(level, Location::caller(), Body::Formatted(args));
    }

    /// Write space-joined values at `level`
    #[track_caller]
    pub fn log_values(&self, level: LogLevel, values: &[&dyn fmt::Display]) {
        let _ = self.emit(level, Location::caller(), Body::Values(values));
    }

    /// Like [`Logger::log_fmt`], returning whether the line was written
    ///
    /// `Ok(false)` means the level was filtered out.
    #[track_caller]
    pub fn try_log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<bool> {
        self.emit(level, Location::caller(), Body::Formatted(args))
    }

    /// Like [`Logger::log_values`], returning whether the line was written
    #[track_caller]
    pub fn try_log_values(&self, level: LogLevel, values: &[&dyn fmt::Display]) -> Result<bool> {
        self.emit(level, Location::caller(), Body::Values(values))
    }

    fn emit(
        &self,
        level: LogLevel,
        origin: &'static Location<'static>,
        body: Body<'_>,
    ) -> Result<bool> {
        let mut guard = self.state.lock();
        if !level.is_enabled_for(guard.level) {
            self.metrics.record_filtered();
            return Ok(false);
        }

        let LoggerState {
            flags,
            prefix,
            out,
            call_depth,
            resolver,
            clock,
            buf,
            ..
        } = &mut *guard;

        buf.clear();
        write_header(
            buf,
            level,
            *flags,
            prefix,
            || clock.now(),
            || resolver.resolve(*call_depth, origin),
        );

        let body_start = buf.len();
        body.write_to(buf);
        if buf.len() == body_start || buf.last() != Some(&b'\n') {
            buf.push(b'\n');
        }

        match out.write_all(buf).and_then(|()| out.flush()) {
            Ok(()) => {
                self.metrics.record_written();
                Ok(true)
            }
            Err(e) => {
                self.report_write_failure(&e);
                Err(LoggerError::io_operation(
                    "writing log line",
                    format!("{} line of {} bytes not delivered", level, buf.len()),
                    e,
                ))
            }
        }
    }

    fn report_write_failure(&self, error: &io::Error) {
        let previous = self.metrics.record_write_failure();
        if previous % FAILURE_ALERT_INTERVAL == 0 {
            eprintln!(
                "[LOGGER ERROR] Sink write failed ({} failures so far): {}",
                previous + 1,
                error
            );
        }
    }

    // Formatted shape

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    /// Same as [`Logger::infof`]
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    /// Write a fatal line. Does not end the process, see
    /// [`termination`](super::termination).
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Fatal, args);
    }

    /// Write a panic line. Does not end the process or unwind.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Panic, args);
    }

    // Positional shape

    #[track_caller]
    pub fn debug(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Debug, values);
    }

    #[track_caller]
    pub fn info(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Info, values);
    }

    /// Same as [`Logger::info`]
    #[track_caller]
    pub fn print(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Info, values);
    }

    /// Same as [`Logger::info`]
    #[track_caller]
    pub fn println(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Info, values);
    }

    #[track_caller]
    pub fn warn(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Warn, values);
    }

    #[track_caller]
    pub fn error(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Error, values);
    }

    #[track_caller]
    pub fn fatal(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Fatal, values);
    }

    #[track_caller]
    pub fn panic(&self, values: &[&dyn fmt::Display]) {
        self.log_values(LogLevel::Panic, values);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("flags", &state.flags)
            .field("prefix", &state.prefix)
            .field("call_depth", &state.call_depth)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Without [`LoggerBuilder::output`] the logger writes to stderr.
///
/// # Example
/// ```
/// use rust_level_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .flags(LogFlags::STD | LogFlags::UTC)
///     .call_depth(2)
///     .build();
/// assert_eq!(logger.call_depth(), 2);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    flags: LogFlags,
    prefix: String,
    call_depth: usize,
    output: Option<Sink>,
    resolver: Arc<dyn CallerResolver>,
    clock: Arc<dyn Clock>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            flags: LogFlags::STD,
            prefix: String::new(),
            call_depth: DEFAULT_CALL_DEPTH,
            output: None,
            resolver: Arc::new(StackResolver),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: LogFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn call_depth(mut self, depth: usize) -> Self {
        self.call_depth = depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, out: impl Write + Send + 'static) -> Self {
        self.output = Some(Box::new(out));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let out = self
            .output
            .unwrap_or_else(|| Box::new(ConsoleSink::stderr()) as Sink);
        Logger::from_parts(
            out,
            self.prefix,
            self.flags,
            self.level,
            self.call_depth,
            self.resolver,
            self.clock,
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::caller::CallSite;
    use crate::core::timestamp::FixedClock;
    use crate::sinks::SharedBuffer;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn buffered(flags: LogFlags) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Logger::new(buffer.clone(), "", flags), buffer)
    }

    struct CountingResolver {
        calls: AtomicUsize,
        last_depth: AtomicUsize,
    }

    impl CountingResolver {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_depth: AtomicUsize::new(usize::MAX),
            }
        }
    }

    impl CallerResolver for CountingResolver {
        fn resolve(&self, call_depth: usize, _origin: &'static Location<'static>) -> Option<CallSite> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_depth.store(call_depth, Ordering::SeqCst);
            Some(CallSite::new("/x/y/z.rs", 7))
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let (logger, _) = buffered(LogFlags::STD);
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.call_depth(), DEFAULT_CALL_DEPTH);
        assert_eq!(logger.flags(), LogFlags::STD);
        assert_eq!(logger.prefix(), "");
    }

    #[test]
    fn test_formatted_line() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.errorf(format_args!("code {}", 500));
        assert_eq!(buffer.contents(), "[ERROR] code 500\n");
    }

    #[test]
    fn test_values_joined_by_spaces() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.info(&[&"retry", &3, &"of", &5]);
        assert_eq!(buffer.contents(), "[INFO] retry 3 of 5\n");
    }

    #[test]
    fn test_empty_values_still_one_line() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.info(&[]);
        assert_eq!(buffer.contents(), "[INFO] \n");
    }

    #[test]
    fn test_newline_not_doubled() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.infof(format_args!("done\n"));
        logger.infof(format_args!("done"));
        logger.infof(format_args!(""));
        assert_eq!(buffer.contents(), "[INFO] done\n[INFO] done\n[INFO] \n");
    }

    #[test]
    fn test_empty_message_after_newline_prefix() {
        let buffer = SharedBuffer::new();
        let logger = Logger::new(buffer.clone(), "banner\n", LogFlags::NONE);
        logger.warnf(format_args!(""));
        assert_eq!(buffer.contents(), "[WARN] banner\n\n");
    }

    #[test]
    fn test_print_aliases_log_at_info() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.print(&[&"a"]);
        logger.println(&[&"b"]);
        logger.printf(format_args!("c"));
        assert_eq!(buffer.contents(), "[INFO] a\n[INFO] b\n[INFO] c\n");
    }

    #[test]
    fn test_fatal_and_panic_return_after_writing() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.fatal(&[&"f"]);
        logger.panicf(format_args!("p"));
        assert_eq!(buffer.contents(), "[FATAL] f\n[PANIC] p\n");
    }

    #[test]
    fn test_level_ceiling() {
        let (logger, buffer) = buffered(LogFlags::NONE);
        logger.set_level(LogLevel::Warn);

        logger.debug(&[&"d"]);
        logger.info(&[&"i"]);
        logger.warn(&[&"w"]);
        logger.error(&[&"e"]);

        assert_eq!(buffer.contents(), "[WARN] w\n[ERROR] e\n");
        assert_eq!(logger.metrics().lines_filtered(), 2);
        assert_eq!(logger.metrics().lines_written(), 2);
        assert!(logger.is_enabled(LogLevel::Error));
        assert!(!logger.is_enabled(LogLevel::Info));
    }

    #[test]
    fn test_filtered_call_skips_resolution() {
        let resolver = Arc::new(CountingResolver::new());
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .flags(LogFlags::FILE)
            .output(buffer.clone())
            .caller_resolver(resolver.clone())
            .build();

        logger.debug(&[&"hidden"]);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
        assert_eq!(buffer.write_calls(), 0);

        logger.info(&[&"shown"]);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(buffer.contents(), "[INFO] y/z.rs:7: shown\n");
    }

    #[test]
    fn test_call_depth_reaches_resolver() {
        let resolver = Arc::new(CountingResolver::new());
        let logger = Logger::builder()
            .flags(LogFlags::FILE)
            .output(io::sink())
            .caller_resolver(resolver.clone())
            .build();

        logger.info(&[&"one"]);
        assert_eq!(resolver.last_depth.load(Ordering::SeqCst), DEFAULT_CALL_DEPTH);

        logger.set_call_depth(3);
        logger.info(&[&"two"]);
        assert_eq!(resolver.last_depth.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_reported_location_is_call_site() {
        let (logger, buffer) = buffered(LogFlags::FILE);
        logger.warnf(format_args!("here"));
        let line = line!() - 1;
        assert_eq!(buffer.contents(), format!("[WARN] core/logger.rs:{}: here\n", line));
    }

    #[test]
    fn test_full_header_with_fixed_clock() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .flags(LogFlags::DATETIME | LogFlags::UTC)
            .prefix("svc: ")
            .clock(Arc::new(clock))
            .output(buffer.clone())
            .build();

        logger.info(&[&"ready"]);
        assert_eq!(buffer.contents(), "2024-01-02 03:04:05 [INFO] svc: ready\n");
    }

    #[test]
    fn test_mutators() {
        let (logger, buffer) = buffered(LogFlags::STD);
        logger.set_flags(LogFlags::NONE);
        logger.set_prefix("db: ");
        logger.set_level(LogLevel::Debug);

        logger.debug(&[&"query"]);
        assert_eq!(buffer.contents(), "[DEBUG] db: query\n");
        assert_eq!(logger.prefix(), "db: ");
    }

    #[test]
    fn test_set_output_switches_sink() {
        let (logger, first) = buffered(LogFlags::NONE);
        logger.info(&[&"one"]);

        let second = SharedBuffer::new();
        logger.set_output(second.clone());
        logger.info(&[&"two"]);

        assert_eq!(first.contents(), "[INFO] one\n");
        assert_eq!(second.contents(), "[INFO] two\n");
    }

    #[test]
    fn test_one_write_per_line() {
        let (logger, buffer) = buffered(LogFlags::STD);
        logger.info(&[&"a", &"b", &"c"]);
        logger.warnf(format_args!("{} {}", 1, 2));
        assert_eq!(buffer.write_calls(), 2);
    }

    #[test]
    fn test_write_failure_is_counted_not_raised() {
        let logger = Logger::new(FailingSink, "", LogFlags::NONE);
        logger.error(&[&"lost"]);
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);

        let err = logger
            .try_log_values(LogLevel::Error, &[&"lost"])
            .unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert_eq!(logger.metrics().write_failures(), 2);
    }

    #[test]
    fn test_try_log_reports_filtering() {
        let (logger, _) = buffered(LogFlags::NONE);
        assert!(!logger.try_log_fmt(LogLevel::Debug, format_args!("x")).unwrap());
        assert!(logger.try_log_fmt(LogLevel::Info, format_args!("x")).unwrap());
    }

    #[test]
    fn test_builder_defaults() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.flags(), LogFlags::STD);
        assert_eq!(logger.call_depth(), DEFAULT_CALL_DEPTH);
    }

    #[test]
    fn test_builder_default_sink_is_stderr_console() {
        let logger = LoggerBuilder::default().flags(LogFlags::NONE).build();
        assert!(logger.try_log_fmt(LogLevel::Info, format_args!("builder default sink")).unwrap());
        assert_eq!(logger.metrics().write_failures(), 0);
        assert_eq!(logger.metrics().lines_written(), 1);
    }

    #[test]
    fn test_debug_output() {
        let (logger, _) = buffered(LogFlags::NONE);
        let text = format!("{:?}", logger);
        assert!(text.contains("level: Info"));
    }
}
