//! Nested logging scopes.
//!
//! A scope is a value temporarily attached to every record logged while it is
//! active. [`ScopeStack::push`] returns a [`ScopeGuard`]; dropping the guard
//! releases the scope, including when the enclosing block unwinds or returns
//! early through `?`.

use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared stack of active scope descriptions.
///
/// Clones refer to the same stack.
#[derive(Debug, Default, Clone)]
pub struct ScopeStack {
    entries: Arc<Mutex<Entries>>,
}

#[derive(Debug, Default)]
struct Entries {
    next_id: u64,
    active: Vec<(u64, String)>,
}

impl ScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Activate `state` until the returned guard is dropped.
    ///
    /// `state` is rendered before the stack is locked, so its `Display`
    /// implementation may itself log through a logger sharing this stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use caplog::ScopeStack;
    ///
    /// let stack = ScopeStack::new();
    /// {
    ///     let _request = stack.push("request 7");
    ///     assert_eq!(stack.scopes(), vec!["request 7".to_owned()]);
    /// }
    /// assert!(stack.is_empty());
    /// ```
    pub fn push(&self, state: impl Display) -> ScopeGuard {
        let text = state.to_string();
        let mut entries = self.entries();
        let id = entries.next_id;
        entries.next_id += 1;
        entries.active.push((id, text));
        ScopeGuard {
            stack: self.clone(),
            id,
        }
    }

    /// Visit each active scope from the outermost to the innermost.
    ///
    /// `f` runs on a snapshot, without the stack locked.
    pub fn for_each_scope(&self, mut f: impl FnMut(&str)) {
        for scope in self.scopes() {
            f(&scope);
        }
    }

    /// Snapshot of the active scopes, outermost first.
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        self.entries()
            .active
            .iter()
            .map(|(_, scope)| scope.clone())
            .collect()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries().active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().active.is_empty()
    }
}

/// Releases a scope when dropped.
///
/// Releasing a scope also releases any scope pushed after it that is still
/// active. Dropping a guard whose scope was already released that way does
/// nothing.
#[derive(Debug)]
#[must_use = "the scope is released as soon as the guard is dropped"]
pub struct ScopeGuard {
    stack: ScopeStack,
    id: u64,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let mut entries = self.stack.entries();
        if let Some(position) = entries.active.iter().position(|(id, _)| *id == self.id) {
            entries.active.truncate(position);
        }
    }
}
