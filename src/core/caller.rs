//! Caller location resolution
//!
//! Every public emission method is `#[track_caller]`, so the location of
//! the outermost untracked call site travels down to the header formatter
//! as `origin`. A [`CallerResolver`] turns that origin, together with the
//! logger's configured call depth, into the `file:line` pair written into
//! the header.
//!
//! Depth 1 names the call site itself. A wrapper layer either carries
//! `#[track_caller]`, so the origin already points past it, or raises the
//! depth by one per untracked layer, in which case [`StackResolver`] walks
//! the stack outward from the origin.

use backtrace::Backtrace;
use std::panic::Location;

/// Placeholder written when the caller location is unavailable
pub const UNKNOWN_FILE: &str = "???";

/// Resolved file path and line of a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Site used when resolution fails
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FILE, 0)
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Maps a call to its source location
///
/// Only consulted for admitted calls with [`LogFlags::FILE`] set. Returning
/// `None` makes the header show `???`.
///
/// [`LogFlags::FILE`]: crate::LogFlags::FILE
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, call_depth: usize, origin: &'static Location<'static>) -> Option<CallSite>;
}

/// Default resolver
///
/// Depth 1 (and 0) reports `origin` without touching the stack. Deeper
/// calls capture a backtrace, find the frame executing `origin` and step
/// `call_depth - 1` frames outward from it. Without debug symbols the
/// origin frame cannot be found and `origin` is reported instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct StackResolver;

impl CallerResolver for StackResolver {
    fn resolve(&self, call_depth: usize, origin: &'static Location<'static>) -> Option<CallSite> {
        if call_depth <= 1 {
            return Some(CallSite::from(origin));
        }
        Some(walk_outward(origin, call_depth - 1).unwrap_or_else(|| CallSite::from(origin)))
    }
}

/// Site `steps` frames outside the frame executing `origin`
fn walk_outward(origin: &Location<'_>, steps: usize) -> Option<CallSite> {
    let trace = Backtrace::new();
    // Inlined functions show up as extra symbols of one frame, innermost first
    let mut sites = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| Some((symbol.filename()?, symbol.lineno()?)));

    sites.position(|(file, line)| line == origin.line() && file.ends_with(origin.file()))?;
    let (file, line) = sites.nth(steps - 1)?;
    Some(CallSite::new(file.to_string_lossy(), line))
}

/// Keep the last two segments of a path (directory and file name)
///
/// ```
/// use rust_level_logger::core::caller::short_path;
///
/// assert_eq!(short_path("/home/app/src/net/conn.rs"), "net/conn.rs");
/// assert_eq!(short_path("main.rs"), "main.rs");
/// ```
pub fn short_path(path: &str) -> &str {
    let mut separators = path
        .char_indices()
        .rev()
        .filter(|&(idx, c)| idx > 0 && (c == '/' || c == '\\'));

    // Skip the separator in front of the file name
    separators.next();
    match separators.next() {
        Some((idx, _)) => &path[idx + 1..],
        None => path,
    }
}
