//! Native log verbosity.
//!
//! The crate itself logs through the [`log`] facade. The native library has
//! its own process-wide level, set with
//! [`NativeApi::set_log_level`](crate::NativeApi::set_log_level). The
//! conversions here keep the two in step, e.g.
//! `api.set_log_level(log::max_level().into())`.

use crate::error::{Error, Result};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable read by [`level_from_env`].
pub const LOG_ENV: &str = "AXIDEV_IO_LOG";

/// Native log level, ordered from most to least verbose.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Maps a raw `AXIDEV_IO_LOG_LEVEL_*` value.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(Error::InvalidArgument(format!("unknown log level {other:?}"))),
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

/// `Off` has no native counterpart and maps to `Error`, the quietest level.
impl From<log::LevelFilter> for LogLevel {
    fn from(filter: log::LevelFilter) -> Self {
        filter.to_level().map_or(LogLevel::Error, LogLevel::from)
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Reads [`LOG_ENV`]. Unset or unparsable values give `None`.
pub fn level_from_env() -> Option<LogLevel> {
    let value = std::env::var(LOG_ENV).ok()?;
    match value.parse() {
        Ok(level) => Some(level),
        Err(e) => {
            log::warn!("ignoring {LOG_ENV}: {e}");
            None
        }
    }
}
