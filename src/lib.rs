//! Test-support utilities: caller locators and test-output logging.
//!
//! # Overview
//! This crate exposes:
//! - [`locator`] — `file:line : description` strings for assertion messages,
//!   with the [`path_line!`], [`relative_path_line!`], [`test_file_line!`] and
//!   [`test_line!`] macros capturing the call site.
//! - [`TestLogger`] and [`TestLoggerProvider`] — loggers writing each record
//!   to a [`TestOutput`] such as the harness-captured [`CapturedOutput`].
//! - [`TestOutputLayer`] and [`logging`] — the same records for events
//!   emitted through `tracing` by the code under test.
//!
//! # Examples
//! ```rust
//! use caplog::{Logger, MemoryOutput, TestLoggerProvider};
//!
//! let output = MemoryOutput::new();
//! let provider = TestLoggerProvider::new(output.clone());
//! let logger = provider.create_logger("checkout").expect("output is set");
//! let _order = logger.begin_scope("order 12");
//! logger.error(caplog::test_line!("payment declined"));
//! assert!(output.contents().starts_with("fail [checkout] "));
//! ```

pub mod error;
pub mod layer;
pub mod level;
pub mod locator;
pub mod logger;
pub mod logging;
pub mod output;
pub mod provider;
pub mod scope;

pub use error::LoggerError;
pub use layer::TestOutputLayer;
pub use level::Level;
pub use locator::Locator;
pub use logger::{AttachedError, EventId, Logger, TestLogger, TypedTestLogger};
pub use output::{CapturedOutput, MemoryOutput, TestOutput};
pub use provider::TestLoggerProvider;
pub use scope::{ScopeGuard, ScopeStack};
