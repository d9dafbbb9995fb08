//! Step definitions for the behavioural tests.

mod locator_steps;
mod logger_steps;

pub use locator_steps::LocatorWorld;
pub use logger_steps::LoggerWorld;
