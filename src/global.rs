//! Process-wide default logger
//!
//! The default logger is an ordinary [`Logger`] held in a replaceable slot.
//! It starts out writing to stderr with [`LogFlags::STD`], an empty prefix
//! and level Info. The free functions here forward to whatever logger is
//! in the slot when they are called.
//!
//! `fatal*` and `panic*` write their line, then hand control to the
//! installed [`Terminator`], which exits the process by default.
//!
//! # Example
//!
//! ```
//! use rust_level_logger::global;
//! use rust_level_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! global::set_output(buffer.clone());
//! global::set_flags(LogFlags::NONE);
//! global::infof(format_args!("listening on {}", 8080));
//!
//! assert_eq!(buffer.contents(), "[INFO] listening on 8080\n");
//! ```

use crate::core::{
    termination::{ProcessExit, Terminator},
    LogFlags, LogLevel, Logger,
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();
static TERMINATOR: OnceLock<RwLock<Arc<dyn Terminator>>> = OnceLock::new();

fn logger_slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| {
        RwLock::new(Arc::new(Logger::new(ConsoleSink::stderr(), "", LogFlags::STD)))
    })
}

fn terminator_slot() -> &'static RwLock<Arc<dyn Terminator>> {
    TERMINATOR.get_or_init(|| RwLock::new(Arc::new(ProcessExit::default())))
}

/// The logger currently in the default slot
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&logger_slot().read())
}

/// Install `logger` as the default, returning the one it replaces
///
/// Calls already running finish on the previous logger.
pub fn set_default_logger(logger: Logger) -> Arc<Logger> {
    std::mem::replace(&mut *logger_slot().write(), Arc::new(logger))
}

/// Install the terminator run after `fatal*`/`panic*` lines
pub fn set_terminator(terminator: Arc<dyn Terminator>) -> Arc<dyn Terminator> {
    std::mem::replace(&mut *terminator_slot().write(), terminator)
}

fn terminate(level: LogLevel) {
    let terminator = Arc::clone(&terminator_slot().read());
    terminator.terminate(level);
}

// Configuration

pub fn set_level(level: LogLevel) {
    default_logger().set_level(level);
}

pub fn set_flags(flags: LogFlags) {
    default_logger().set_flags(flags);
}

pub fn set_prefix(prefix: impl Into<String>) {
    default_logger().set_prefix(prefix);
}

pub fn set_output(out: impl Write + Send + 'static) {
    default_logger().set_output(out);
}

pub fn set_call_depth(depth: usize) {
    default_logger().set_call_depth(depth);
}

// Formatted shape

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    default_logger().debugf(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    default_logger().infof(args);
}

#[track_caller]
pub fn printf(args: fmt::Arguments<'_>) {
    default_logger().printf(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    default_logger().warnf(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    default_logger().errorf(args);
}

/// Write a fatal line, then run the terminator
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) {
    default_logger().fatalf(args);
    terminate(LogLevel::Fatal);
}

/// Write a panic line, then run the terminator
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) {
    default_logger().panicf(args);
    terminate(LogLevel::Panic);
}

// Positional shape

#[track_caller]
pub fn debug(values: &[&dyn fmt::Display]) {
    default_logger().debug(values);
}

#[track_caller]
pub fn info(values: &[&dyn fmt::Display]) {
    default_logger().info(values);
}

#[track_caller]
pub fn print(values: &[&dyn fmt::Display]) {
    default_logger().print(values);
}

#[track_caller]
pub fn println(values: &[&dyn fmt::Display]) {
    default_logger().println(values);
}

#[track_caller]
pub fn warn(values: &[&dyn fmt::Display]) {
    default_logger().warn(values);
}

#[track_caller]
pub fn error(values: &[&dyn fmt::Display]) {
    default_logger().error(values);
}

#[track_caller]
pub fn fatal(values: &[&dyn fmt::Display]) {
    default_logger().fatal(values);
    terminate(LogLevel::Fatal);
}

#[track_caller]
pub fn panic(values: &[&dyn fmt::Display]) {
    default_logger().panic(values);
    terminate(LogLevel::Panic);
}
