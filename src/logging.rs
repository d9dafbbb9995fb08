//! Subscriber setup for tests.
//!
//! Filters are always passed explicitly; nothing here reads `RUST_LOG`, so
//! the outcome of a test does not depend on the environment it runs in.

use std::sync::Arc;

use tracing::Subscriber;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::error::{LoggerError, Result};
use crate::layer::TestOutputLayer;
use crate::output::{CapturedOutput, TestOutput};

/// Build a subscriber routing events accepted by `filter` to `layer`.
///
/// `filter` uses [`EnvFilter`] directive syntax, e.g. `"info,app::db=trace"`.
pub fn subscriber(layer: TestOutputLayer, filter: &str) -> impl Subscriber + Send + Sync + use<> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(layer)
}

/// Route events to `output` on the current thread until the guard is dropped.
///
/// Rust runs each test on its own thread, so this scopes the logger to the
/// test that installed it.
///
/// # Examples
///
/// ```
/// use caplog::MemoryOutput;
/// use caplog::logging::set_default;
///
/// let output = MemoryOutput::new();
/// let _guard = set_default(output.clone(), "info");
/// tracing::debug!("filtered out");
/// tracing::info!(target: "demo", "kept");
/// assert_eq!(output.lines(), vec!["info [demo] kept"]);
/// ```
#[must_use = "events are only routed while the guard is alive"]
pub fn set_default(output: impl TestOutput + 'static, filter: &str) -> DefaultGuard {
    subscriber(TestOutputLayer::new(Arc::new(output)), filter).set_default()
}

/// Route events to the test harness' captured output on the current thread.
#[must_use = "events are only routed while the guard is alive"]
pub fn set_default_captured(filter: &str) -> DefaultGuard {
    set_default(CapturedOutput, filter)
}

/// Install a process-wide subscriber writing to `output`.
///
/// Prefer [`set_default`] in tests; a global subscriber is shared by every
/// test in the binary.
///
/// # Errors
///
/// Returns [`LoggerError::AlreadyInitialised`] if a global subscriber was
/// already installed.
pub fn init(output: impl TestOutput + 'static, filter: &str) -> Result<()> {
    subscriber(TestOutputLayer::new(Arc::new(output)), filter)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialised)
}
