//! Factory for category-named test loggers.

use std::fmt;
use std::sync::Arc;

use crate::error::{LoggerError, Result};
use crate::layer::TestOutputLayer;
use crate::logger::{TestLogger, TypedTestLogger};
use crate::output::TestOutput;
use crate::scope::ScopeStack;

/// Creates [`TestLogger`]s that share one output.
///
/// The provider borrows the output for the lifetime of the test; dropping the
/// provider never closes it.
///
/// # Examples
///
/// ```
/// use caplog::{Logger, MemoryOutput, TestLoggerProvider};
///
/// let output = MemoryOutput::new();
/// let provider = TestLoggerProvider::new(output.clone());
/// let logger = provider.create_logger("orders").expect("output is set");
/// logger.information("placed");
/// assert_eq!(output.lines(), vec!["info [orders] placed"]);
/// ```
#[derive(Clone, Default)]
pub struct TestLoggerProvider {
    output: Option<Arc<dyn TestOutput>>,
}

impl fmt::Debug for TestLoggerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestLoggerProvider")
            .field("has_output", &self.output.is_some())
            .finish()
    }
}

impl TestLoggerProvider {
    /// Provider writing to `output`.
    #[must_use]
    pub fn new(output: impl TestOutput + 'static) -> Self {
        Self::from_shared(Arc::new(output))
    }

    /// Provider writing to an output shared with other components.
    #[must_use]
    pub fn from_shared(output: Arc<dyn TestOutput>) -> Self {
        Self {
            output: Some(output),
        }
    }

    /// Set or replace the output.
    #[must_use]
    pub fn with_output(mut self, output: impl TestOutput + 'static) -> Self {
        self.output = Some(Arc::new(output));
        self
    }

    #[must_use]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    fn output(&self) -> Result<Arc<dyn TestOutput>> {
        self.output.clone().ok_or(LoggerError::MissingOutput)
    }

    /// Create a logger for `category` with its own scope stack.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::MissingOutput`] if no output was configured.
    pub fn create_logger(&self, category: impl Into<String>) -> Result<TestLogger> {
        let output = self.output()?;
        Ok(TestLogger::new(ScopeStack::new(), category, output))
    }

    /// Create a logger categorised by the type name of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::MissingOutput`] if no output was configured.
    pub fn create_typed_logger<T>(&self) -> Result<TypedTestLogger<T>> {
        let output = self.output()?;
        Ok(TypedTestLogger::new(ScopeStack::new(), output))
    }

    /// A `tracing` layer writing through this provider.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::MissingOutput`] if no output was configured.
    pub fn layer(&self) -> Result<TestOutputLayer> {
        Ok(TestOutputLayer::new(self.output()?))
    }
}
