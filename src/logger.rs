//! Loggers that write each record to a [`TestOutput`].
//!
//! A record is rendered as
//!
//! ```text
//! <prefix> [<category>] <message>
//!
//! <error, then one "Caused by:" line per source>
//!  => <outermost scope>
//!  => <innermost scope>
//! ```
//!
//! and handed to the output in a single [`TestOutput::write_line`] call.

use std::any::type_name;
use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::Result;
use crate::level::Level;
use crate::output::TestOutput;
use crate::scope::{ScopeGuard, ScopeStack};

/// Error attached to a record, if any.
pub type AttachedError<'a> = Option<&'a (dyn Error + 'static)>;

/// Identifier of a logged event.
///
/// Carried through to formatters but not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventId {
    pub id: i32,
    pub name: Option<String>,
}

impl EventId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    #[must_use]
    pub fn named(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// The logging contract: scopes, an enablement check and structured records.
pub trait Logger {
    /// Attach `state` to every record logged until the guard is dropped.
    fn begin_scope(&self, state: impl Display) -> ScopeGuard;

    /// Whether records at `level` are written.
    fn is_enabled(&self, level: Level) -> bool;

    /// Write a record whose message is produced by `formatter`.
    ///
    /// Records at disabled levels are dropped without calling `formatter`.
    fn log<S, F>(
        &self,
        level: Level,
        event_id: EventId,
        state: S,
        error: AttachedError<'_>,
        formatter: F,
    ) where
        F: FnOnce(&S, AttachedError<'_>) -> String;

    /// Log `message` with an attached error.
    fn log_error(&self, level: Level, message: impl Display, error: &(dyn Error + 'static)) {
        self.log(
            level,
            EventId::default(),
            message,
            Some(error),
            |message, _| message.to_string(),
        );
    }

    fn trace(&self, message: impl Display) {
        log_message(self, Level::Trace, message);
    }

    fn debug(&self, message: impl Display) {
        log_message(self, Level::Debug, message);
    }

    fn information(&self, message: impl Display) {
        log_message(self, Level::Information, message);
    }

    fn warning(&self, message: impl Display) {
        log_message(self, Level::Warning, message);
    }

    fn error(&self, message: impl Display) {
        log_message(self, Level::Error, message);
    }

    fn critical(&self, message: impl Display) {
        log_message(self, Level::Critical, message);
    }
}

fn log_message<L: Logger + ?Sized>(logger: &L, level: Level, message: impl Display) {
    logger.log(level, EventId::default(), message, None, |message, _| {
        message.to_string()
    });
}

/// Logger bound to one category and one output.
///
/// # Examples
///
/// ```
/// use caplog::{Logger, MemoryOutput, TestLogger};
///
/// let output = MemoryOutput::new();
/// let logger = TestLogger::for_output(output.clone());
/// let _scope = logger.begin_scope("batch 3");
/// logger.warning("disk nearly full");
/// assert_eq!(output.lines(), vec!["warn [] disk nearly full\n => batch 3"]);
/// ```
#[derive(Clone)]
pub struct TestLogger {
    category: String,
    scopes: ScopeStack,
    output: Arc<dyn TestOutput>,
}

impl fmt::Debug for TestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestLogger")
            .field("category", &self.category)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl TestLogger {
    #[must_use]
    pub fn new(
        scopes: ScopeStack,
        category: impl Into<String>,
        output: Arc<dyn TestOutput>,
    ) -> Self {
        Self {
            category: category.into(),
            scopes,
            output,
        }
    }

    /// Logger with an empty category writing to `output`.
    #[must_use]
    pub fn for_output(output: impl TestOutput + 'static) -> Self {
        Self::new(ScopeStack::new(), "", Arc::new(output))
    }

    /// Logger whose category is the type name of `T`.
    #[must_use]
    pub fn for_type<T>(output: impl TestOutput + 'static) -> TypedTestLogger<T> {
        TypedTestLogger::new(ScopeStack::new(), Arc::new(output))
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// Render a record exactly as it would be written.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnknownLevel`](crate::LoggerError::UnknownLevel)
    /// when `level` has no prefix.
    pub fn format_record(
        &self,
        level: Level,
        message: &str,
        error: AttachedError<'_>,
    ) -> Result<String> {
        let mut text = format!("{} [{}] {message}", level.prefix()?, self.category);

        if let Some(error) = error {
            text.push_str("\n\n");
            write_error_chain(&mut text, error);
        }

        self.scopes.for_each_scope(|scope| {
            text.push_str("\n => ");
            text.push_str(scope);
        });
        Ok(text)
    }
}

fn write_error_chain(text: &mut String, error: &(dyn Error + 'static)) {
    let _ = write!(text, "{error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, "\nCaused by: {cause}");
        source = cause.source();
    }
}

impl Logger for TestLogger {
    fn begin_scope(&self, state: impl Display) -> ScopeGuard {
        self.scopes.push(state)
    }

    fn is_enabled(&self, level: Level) -> bool {
        level != Level::None
    }

    fn log<S, F>(
        &self,
        level: Level,
        _event_id: EventId,
        state: S,
        error: AttachedError<'_>,
        formatter: F,
    ) where
        F: FnOnce(&S, AttachedError<'_>) -> String,
    {
        if !self.is_enabled(level) {
            return;
        }
        let message = formatter(&state, error);
        if let Ok(text) = self.format_record(level, &message, error) {
            self.output.write_line(&text);
        }
    }
}

/// [`TestLogger`] categorised by the type name of `T`.
pub struct TypedTestLogger<T> {
    inner: TestLogger,
    _category: PhantomData<fn() -> T>,
}

impl<T> TypedTestLogger<T> {
    #[must_use]
    pub fn new(scopes: ScopeStack, output: Arc<dyn TestOutput>) -> Self {
        Self {
            inner: TestLogger::new(scopes, type_name::<T>(), output),
            _category: PhantomData,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> TestLogger {
        self.inner
    }
}

impl<T> Clone for TypedTestLogger<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _category: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedTestLogger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedTestLogger").field(&self.inner).finish()
    }
}

impl<T> Deref for TypedTestLogger<T> {
    type Target = TestLogger;

    fn deref(&self) -> &TestLogger {
        &self.inner
    }
}

impl<T> Logger for TypedTestLogger<T> {
    fn begin_scope(&self, state: impl Display) -> ScopeGuard {
        self.inner.begin_scope(state)
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.inner.is_enabled(level)
    }

    fn log<S, F>(
        &self,
        level: Level,
        event_id: EventId,
        state: S,
        error: AttachedError<'_>,
        formatter: F,
    ) where
        F: FnOnce(&S, AttachedError<'_>) -> String,
    {
        self.inner.log(level, event_id, state, error, formatter);
    }
}
