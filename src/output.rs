//! Destinations for formatted log records.
//!
//! A [`TestOutput`] receives each record as a single line of text. The line
//! may itself span several physical lines when a record carries an error or
//! scopes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A sink receiving one formatted record per call.
///
/// Implementations decide whether concurrent writers are safe; loggers add
/// no locking of their own.
pub trait TestOutput: Send + Sync {
    /// Write `line` followed by a line terminator.
    fn write_line(&self, line: &str);
}

impl<T: TestOutput + ?Sized> TestOutput for Arc<T> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}

impl<T: TestOutput + ?Sized> TestOutput for &T {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}

/// Output captured by the Rust test harness.
///
/// Lines go through `println!`, which libtest captures per test and replays
/// next to the failure report (or immediately with `--nocapture`).
#[derive(Debug, Default, Clone, Copy)]
pub struct CapturedOutput;

impl TestOutput for CapturedOutput {
    #[expect(clippy::print_stdout, reason = "libtest only captures the print macros")]
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

/// In-memory output for asserting on what was logged.
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use caplog::{MemoryOutput, TestOutput};
///
/// let output = MemoryOutput::new();
/// output.clone().write_line("hello");
/// assert_eq!(output.lines(), vec!["hello".to_owned()]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// All lines joined with `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer().join("\n")
    }

    /// Remove every captured line.
    pub fn clear(&self) {
        self.buffer().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}

impl TestOutput for MemoryOutput {
    fn write_line(&self, line: &str) {
        self.buffer().push(line.to_owned());
    }
}
