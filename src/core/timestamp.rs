//! Timestamp source and rendering
//!
//! The header time is written as `YYYY-MM-DD HH:MM:SS`, in the local zone
//! unless [`LogFlags::UTC`] is set, with a `.ffffff` fraction appended when
//! [`LogFlags::MICROSECONDS`] is set.

use super::flags::LogFlags;
use chrono::{DateTime, Local, Utc};
use std::io::Write;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATETIME_MICROS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Source of the current time for log headers
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for reproducible headers
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_level_logger::core::timestamp::{Clock, FixedClock};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Append the header time for `instant` to `buf`
pub fn write_timestamp(buf: &mut Vec<u8>, instant: DateTime<Utc>, flags: LogFlags) {
    let format = if flags.contains(LogFlags::MICROSECONDS) {
        DATETIME_MICROS_FORMAT
    } else {
        DATETIME_FORMAT
    };

    // Writing into a Vec cannot fail
    let _ = if flags.contains(LogFlags::UTC) {
        write!(buf, "{}", instant.format(format))
    } else {
        write!(buf, "{}", instant.with_timezone(&Local).format(format))
    };
}
