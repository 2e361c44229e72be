//! Log level definitions
//!
//! Levels are ordered from most severe to most verbose. A logger's level
//! acts as a verbosity ceiling: a message is emitted when its level is
//! less than or equal to the ceiling.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u32)]
pub enum LogLevel {
    Panic = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

/// Tag used for numeric values outside the known range
pub const UNKNOWN_TAG: &str = "[UNKNOWN]";

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Panic,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Canonical bracketed tag written into every log header
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Panic => "[PANIC]",
            LogLevel::Fatal => "[FATAL]",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Info => "[INFO]",
            LogLevel::Debug => "[DEBUG]",
        }
    }

    /// Lowercase name, accepted back by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Tag for a raw numeric level; never fails
    ///
    /// ```
    /// use rust_level_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::tag_for(2), "[ERROR]");
    /// assert_eq!(LogLevel::tag_for(42), "[UNKNOWN]");
    /// ```
    pub fn tag_for(value: u32) -> &'static str {
        Self::from_u32(value).map_or(UNKNOWN_TAG, |level| level.tag())
    }

    /// Whether a message at this level passes the given verbosity ceiling
    #[inline]
    pub fn is_enabled_for(&self, ceiling: LogLevel) -> bool {
        *self <= ceiling
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panic" => Ok(LogLevel::Panic),
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Parse a level name, case-insensitively
pub fn parse_level(text: &str) -> Result<LogLevel, LoggerError> {
    text.parse()
}
