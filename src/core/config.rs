//! Logger configuration
//!
//! [`LoggerConfig`] carries the plain settings of a logger so they can be
//! read from JSON or the environment and applied to a sink at startup.

use super::{
    error::{LoggerError, Result},
    flags::LogFlags,
    log_level::LogLevel,
    logger::{Logger, DEFAULT_CALL_DEPTH},
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Environment variable holding the level name
pub const ENV_LEVEL: &str = "LOG_LEVEL";
/// Environment variable holding the prefix
pub const ENV_PREFIX: &str = "LOG_PREFIX";
/// Environment variable holding the raw flag bits
pub const ENV_FLAGS: &str = "LOG_FLAGS";
/// Environment variable holding the call depth
pub const ENV_CALL_DEPTH: &str = "LOG_CALL_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub flags: LogFlags,
    pub prefix: String,
    pub call_depth: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            flags: LogFlags::STD,
            prefix: String::new(),
            call_depth: DEFAULT_CALL_DEPTH,
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON document; missing fields keep their defaults
    ///
    /// # Example
    ///
    /// ```
    /// use rust_level_logger::prelude::*;
    ///
    /// let config = LoggerConfig::from_json(r#"{ "level": "Warning", "prefix": "api: " }"#)?;
    /// assert_eq!(config.level, LogLevel::Warn);
    /// assert_eq!(config.flags, LogFlags::STD);
    /// # Ok::<(), LoggerError>(())
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply `LOG_LEVEL`, `LOG_PREFIX`, `LOG_FLAGS` and `LOG_CALL_DEPTH`
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level.trim().parse()?;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            self.prefix = prefix;
        }
        if let Some(flags) = lookup(ENV_FLAGS) {
            let bits = flags.trim().parse::<u32>().map_err(|e| {
                LoggerError::config(ENV_FLAGS, format!("expected flag bits, got {:?}: {}", flags, e))
            })?;
            self.flags = LogFlags::from_bits(bits);
        }
        if let Some(depth) = lookup(ENV_CALL_DEPTH) {
            self.call_depth = depth.trim().parse().map_err(|e| {
                LoggerError::config(
                    ENV_CALL_DEPTH,
                    format!("expected an unsigned integer, got {:?}: {}", depth, e),
                )
            })?;
        }
        Ok(self)
    }

    /// Build a logger writing to `out`
    pub fn build(&self, out: impl Write + Send + 'static) -> Logger {
        Logger::builder()
            .level(self.level)
            .flags(self.flags)
            .prefix(self.prefix.clone())
            .call_depth(self.call_depth)
            .output(out)
            .build()
    }

    /// Apply these settings to an existing logger, one mutator at a time
    pub fn apply_to(&self, logger: &Logger) {
        logger.set_level(self.level);
        logger.set_flags(self.flags);
        logger.set_prefix(self.prefix.clone());
        logger.set_call_depth(self.call_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.flags, LogFlags::STD);
        assert_eq!(config.call_depth, 1);
    }

    #[test]
    fn test_from_json() {
        let config =
            LoggerConfig::from_json(r#"{"level":"debug","flags":1,"prefix":"x: ","call_depth":2}"#)
                .unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.flags, LogFlags::DATETIME);
        assert_eq!(config.prefix, "x: ");
        assert_eq!(config.call_depth, 2);
    }

    #[test]
    fn test_from_json_rejects_bad_level() {
        let err = LoggerConfig::from_json(r#"{"level":"loud"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(LoggerConfig::from_json(r#"{"colour":true}"#).is_err());
    }

    #[test]
    fn test_json_roundtrip_uses_names() {
        let json = serde_json::to_string(&LoggerConfig::default()).unwrap();
        assert_eq!(json, r#"{"level":"info","flags":3,"prefix":"","call_depth":1}"#);
    }

    #[test]
    fn test_overrides() {
        let config = LoggerConfig::default()
            .with_overrides(lookup(&[
                (ENV_LEVEL, " WARN "),
                (ENV_PREFIX, "svc: "),
                (ENV_FLAGS, "2"),
                (ENV_CALL_DEPTH, "3"),
            ]))
            .unwrap();

        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.prefix, "svc: ");
        assert_eq!(config.flags, LogFlags::FILE);
        assert_eq!(config.call_depth, 3);
    }

    #[test]
    fn test_override_errors() {
        let err = LoggerConfig::default()
            .with_overrides(lookup(&[(ENV_LEVEL, "chatty")]))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));

        let err = LoggerConfig::default()
            .with_overrides(lookup(&[(ENV_CALL_DEPTH, "-1")]))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerConfig::default()
            .with_overrides(lookup(&[(ENV_FLAGS, "all")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_FLAGS));
    }

    #[test]
    fn test_build_and_apply() {
        let config = LoggerConfig {
            level: LogLevel::Error,
            flags: LogFlags::NONE,
            prefix: "p ".to_string(),
            call_depth: 4,
        };

        let logger = config.build(std::io::sink());
        assert_eq!(logger.level(), LogLevel::Error);
        assert_eq!(logger.call_depth(), 4);

        let other = Logger::new(std::io::sink(), "", LogFlags::STD);
        config.apply_to(&other);
        assert_eq!(other.flags(), LogFlags::NONE);
        assert_eq!(other.prefix(), "p ");
    }
}
