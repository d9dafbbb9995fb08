//! `tracing` integration.
//!
//! [`TestOutputLayer`] turns each `tracing` event into one test logger record:
//! the event target is the category, the `message` field followed by the
//! remaining fields is the message, an error recorded on the event is the
//! attached error, and the spans the event occurred in are the scopes, from
//! the root span inward.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::{LookupSpan, SpanRef};

use crate::level::Level;
use crate::logger::{EventId, Logger, TestLogger};
use crate::output::TestOutput;
use crate::scope::{ScopeGuard, ScopeStack};

const MESSAGE_FIELD: &str = "message";

/// Layer writing `tracing` events to a [`TestOutput`].
///
/// # Examples
///
/// ```
/// use caplog::{MemoryOutput, TestOutputLayer};
/// use tracing_subscriber::layer::SubscriberExt as _;
///
/// let output = MemoryOutput::new();
/// let subscriber = tracing_subscriber::registry().with(TestOutputLayer::new(
///     std::sync::Arc::new(output.clone()),
/// ));
/// tracing::subscriber::with_default(subscriber, || {
///     let _span = tracing::info_span!("job", id = 4).entered();
///     tracing::warn!(target: "worker", "slow");
/// });
/// assert_eq!(output.lines(), vec!["warn [worker] slow\n => job{id=4}"]);
/// ```
#[derive(Clone)]
pub struct TestOutputLayer {
    output: Arc<dyn TestOutput>,
}

impl fmt::Debug for TestOutputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestOutputLayer").finish_non_exhaustive()
    }
}

impl TestOutputLayer {
    #[must_use]
    pub fn new(output: Arc<dyn TestOutput>) -> Self {
        Self { output }
    }
}

/// Rendered fields of a span, kept in the span's extensions.
struct SpanFields(String);

/// Error captured from an event field, detached from the event's lifetime.
#[derive(Debug, Error)]
#[error("{message}")]
struct RecordedError {
    message: String,
    #[source]
    source: Option<Box<RecordedError>>,
}

impl RecordedError {
    fn capture(error: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: error.to_string(),
            source: error.source().map(|cause| Box::new(Self::capture(cause))),
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: String,
    error: Option<RecordedError>,
    /// Span fields are all rendered as `key=value`, `message` included.
    span_fields: bool,
}

impl FieldVisitor {
    fn for_span() -> Self {
        Self {
            span_fields: true,
            ..Self::default()
        }
    }

    fn is_message(&self, field: &Field) -> bool {
        !self.span_fields && field.name() == MESSAGE_FIELD
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn message(&self) -> String {
        match (self.message.as_deref(), self.fields.is_empty()) {
            (Some(message), true) => message.to_owned(),
            (Some(message), false) => format!("{message} {}", self.fields),
            (None, _) => self.fields.clone(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if self.is_message(field) {
            self.message = Some(value.to_owned());
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if !self.span_fields && self.error.is_none() {
            self.error = Some(RecordedError::capture(value));
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if self.is_message(field) {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

fn describe_span<S>(span: &SpanRef<'_, S>) -> String
where
    S: for<'a> LookupSpan<'a>,
{
    let extensions = span.extensions();
    match extensions.get::<SpanFields>() {
        Some(SpanFields(fields)) if !fields.is_empty() => format!("{}{{{fields}}}", span.name()),
        _ => span.name().to_owned(),
    }
}

impl<S> Layer<S> for TestOutputLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = FieldVisitor::for_span();
        attrs.record(&mut visitor);
        span.extensions_mut()
            .insert(SpanFields(visitor.message()));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = FieldVisitor::for_span();
        values.record(&mut visitor);
        let recorded = visitor.message();
        if recorded.is_empty() {
            return;
        }
        let mut extensions = span.extensions_mut();
        if let Some(SpanFields(fields)) = extensions.get_mut::<SpanFields>() {
            if !fields.is_empty() {
                fields.push(' ');
            }
            fields.push_str(&recorded);
        } else {
            extensions.insert(SpanFields(recorded));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let logger = TestLogger::new(
            ScopeStack::new(),
            metadata.target(),
            Arc::clone(&self.output),
        );

        let _scopes: Vec<ScopeGuard> = ctx
            .event_scope(event)
            .into_iter()
            .flat_map(|scope| scope.from_root())
            .map(|span| logger.begin_scope(describe_span(&span)))
            .collect();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let error = visitor
            .error
            .as_ref()
            .map(|error| error as &(dyn std::error::Error + 'static));

        logger.log(
            Level::from(*metadata.level()),
            EventId::default(),
            &visitor,
            error,
            |fields, _| fields.message(),
        );
    }
}
