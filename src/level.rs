//! Log severity levels and their output prefixes.

use std::fmt;
use std::str::FromStr;

use crate::error::{LoggerError, Result};

/// Severity of a log record.
///
/// `None` is a sentinel meaning "log nothing"; it is never enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    None,
}

impl Level {
    /// Every level, in increasing severity.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Information,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::None,
    ];

    /// The fixed four-letter prefix written before each record.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnknownLevel`] for [`Level::None`], which has
    /// no prefix because it is never written.
    ///
    /// # Examples
    ///
    /// ```
    /// use caplog::Level;
    ///
    /// assert_eq!(Level::Error.prefix(), Ok("fail"));
    /// assert!(Level::None.prefix().is_err());
    /// ```
    pub const fn prefix(self) -> Result<&'static str> {
        match self {
            Self::Trace => Ok("trce"),
            Self::Debug => Ok("dbug"),
            Self::Information => Ok("info"),
            Self::Warning => Ok("warn"),
            Self::Error => Ok("fail"),
            Self::Critical => Ok("crit"),
            Self::None => Err(LoggerError::UnknownLevel(self)),
        }
    }

    /// Lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "information" | "info" => Ok(Self::Information),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "none" => Ok(Self::None),
            _ => Err(LoggerError::ParseLevel(s.to_owned())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Information,
            tracing::Level::WARN => Self::Warning,
            _ => Self::Error,
        }
    }
}
