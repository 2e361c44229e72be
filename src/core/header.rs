//! Header layout
//!
//! Every line starts with, in this fixed order:
//!
//! ```text
//! [<date> <time> ]<level tag> [<dir/file>:<line>: ]<prefix>
//! ```
//!
//! The time and location parts depend on the logger's flags. The prefix is
//! written verbatim. Log-parsing tools may depend on this layout.

use super::caller::{short_path, CallSite};
use super::flags::LogFlags;
use super::log_level::LogLevel;
use super::timestamp::write_timestamp;
use chrono::{DateTime, Utc};
use std::io::Write;

/// Append the header for one line to `buf`
///
/// `now` and `site` are only invoked when the matching flag is set.
pub fn write_header<N, S>(
    buf: &mut Vec<u8>,
    level: LogLevel,
    flags: LogFlags,
    prefix: &str,
    now: N,
    site: S,
) where
    N: FnOnce() -> DateTime<Utc>,
    S: FnOnce() -> Option<CallSite>,
{
    if flags.contains(LogFlags::DATETIME) {
        write_timestamp(buf, now(), flags);
        buf.push(b' ');
    }

    buf.extend_from_slice(level.tag().as_bytes());
    buf.push(b' ');

    if flags.contains(LogFlags::FILE) {
        let site = site().unwrap_or_else(CallSite::unknown);
        buf.extend_from_slice(short_path(&site.file).as_bytes());
        let _ = write!(buf, ":{}: ", site.line);
    }

    buf.extend_from_slice(prefix.as_bytes());
}
