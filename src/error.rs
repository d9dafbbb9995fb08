//! Errors raised by the test logger.

use thiserror::Error;

use crate::level::Level;

/// Errors that can occur when building or driving a test logger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    /// The provider was asked for a logger before an output was configured.
    #[error(
        "the test output was not set in the provider; construct it with \
         `TestLoggerProvider::new(output)` or call `with_output` in the test setup"
    )]
    MissingOutput,
    /// A level without a prefix reached the formatter.
    #[error("log level `{0}` has no output prefix")]
    UnknownLevel(Level),
    /// A level name could not be parsed.
    #[error("unrecognised log level name: {0:?}")]
    ParseLevel(String),
    /// A global subscriber was already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}

pub type Result<T> = std::result::Result<T, LoggerError>;
