//! Behavioural test steps for the test output logger and its provider.

#![expect(clippy::expect_used, reason = "simplify test failure output")]

use caplog::{
    EventId, Level, Logger, LoggerError, MemoryOutput, ScopeGuard, TestLogger,
    TestLoggerProvider,
};
use cucumber::{World, given, then, when};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
struct StepError(String);

#[derive(Debug, Default, World)]
pub struct LoggerWorld {
    output: MemoryOutput,
    provider: TestLoggerProvider,
    logger: Option<TestLogger>,
    scopes: Vec<ScopeGuard>,
    created: Option<Result<TestLogger, LoggerError>>,
}

impl LoggerWorld {
    fn logger(&self) -> &TestLogger {
        self.logger.as_ref().expect("no logger created - test setup error")
    }
}

/// Feature files spell line breaks as `\n`.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[given("a provider with an in-memory output")]
fn provider_with_output(world: &mut LoggerWorld) {
    world.provider = TestLoggerProvider::new(world.output.clone());
}

#[given("a provider without an output")]
fn provider_without_output(world: &mut LoggerWorld) {
    world.provider = TestLoggerProvider::default();
}

#[given(regex = r#"^a logger for category \"(.+)\"$"#)]
fn logger_for_category(world: &mut LoggerWorld, category: String) {
    world.logger = Some(
        world
            .provider
            .create_logger(category)
            .expect("provider has an output"),
    );
}

#[given(regex = r#"^the scope \"(.+)\" is active$"#)]
fn scope_is_active(world: &mut LoggerWorld, scope: String) {
    let guard = world.logger().begin_scope(scope);
    world.scopes.push(guard);
}

#[when(regex = r#"^\"(.+)\" is logged at level \"(\w+)\"$"#)]
fn logged_at_level(world: &mut LoggerWorld, message: String, level: Level) {
    world
        .logger()
        .log(level, EventId::default(), message, None, |m, _| m.clone());
}

#[when(regex = r#"^\"(.+)\" is logged at level \"(\w+)\" with error \"(.+)\"$"#)]
fn logged_with_error(world: &mut LoggerWorld, message: String, level: Level, error: String) {
    world.logger().log_error(level, message, &StepError(error));
}

#[when(regex = r#"^a logger is requested for category \"(.+)\"$"#)]
fn logger_requested(world: &mut LoggerWorld, category: String) {
    world.created = Some(world.provider.create_logger(category));
}

#[then(regex = r#"^the output is \"(.+)\"$"#)]
fn the_output_is(world: &mut LoggerWorld, expected: String) {
    assert_eq!(world.output.lines(), vec![unescape(&expected)]);
}

#[then("nothing is written")]
fn nothing_is_written(world: &mut LoggerWorld) {
    assert!(world.output.is_empty());
}

#[then("the request fails with a missing output error")]
fn request_fails(world: &mut LoggerWorld) {
    match world.created.take() {
        Some(result) => assert!(matches!(result, Err(LoggerError::MissingOutput))),
        None => panic!("no logger requested - test setup error"),
    }
}
