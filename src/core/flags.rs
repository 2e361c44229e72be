//! Header flags
//!
//! A bitmask choosing which optional parts of the header are written.
//! Bits the formatter does not know are kept but never acted on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogFlags(u32);

impl LogFlags {
    /// No optional header parts
    pub const NONE: LogFlags = LogFlags(0);
    /// Local date and time: `2009-01-23 01:23:23`
    pub const DATETIME: LogFlags = LogFlags(1);
    /// Caller location: `dir/file.rs:23`
    pub const FILE: LogFlags = LogFlags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Needs `DATETIME`
    pub const MICROSECONDS: LogFlags = LogFlags(1 << 2);
    /// Render the time in UTC instead of the local zone
    pub const UTC: LogFlags = LogFlags(1 << 3);
    /// Initial flags of a new logger
    pub const STD: LogFlags = LogFlags(Self::DATETIME.0 | Self::FILE.0);

    pub const fn from_bits(bits: u32) -> Self {
        LogFlags(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: LogFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LogFlags {
    type Output = LogFlags;

    fn bitor(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: LogFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for LogFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(LogFlags, &str); 4] = [
            (LogFlags::DATETIME, "DATETIME"),
            (LogFlags::FILE, "FILE"),
            (LogFlags::MICROSECONDS, "MICROSECONDS"),
            (LogFlags::UTC, "UTC"),
        ];

        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "LogFlags({:#x}: {})", self.0, names.join(" | "))
    }
}
