//! Behavioural test steps for the locator formatters.
//!
//! Paths and lines are given explicitly so the expected strings do not depend
//! on where this file lives.

use caplog::locator::{path_line, relative_path_line, test_file_line, test_line};
use cucumber::{World, given, then, when};

#[derive(Debug, Default, World)]
pub struct LocatorWorld {
    path: String,
    line: u32,
    located: Option<String>,
}

#[given(regex = r#"^the source path \"(.+)\" at line (\d+)$"#)]
fn the_source_path(world: &mut LocatorWorld, path: String, line: u32) {
    world.path = path;
    world.line = line;
}

#[when(regex = r#"^a path locator is built with description \"(.+)\"$"#)]
fn path_locator_with_description(world: &mut LocatorWorld, description: String) {
    world.located = Some(path_line(&description, &world.path, world.line));
}

#[when("a path locator is built without a description")]
fn path_locator_without_description(world: &mut LocatorWorld) {
    world.located = Some(path_line("", &world.path, world.line));
}

#[when("a relative locator is built without a description")]
fn relative_locator(world: &mut LocatorWorld) {
    world.located = Some(relative_path_line("", &world.path, world.line));
}

#[when(regex = r#"^a file locator is built with description \"(.+)\"$"#)]
fn file_locator(world: &mut LocatorWorld, description: String) {
    world.located = Some(test_file_line(&description, &world.path, world.line));
}

#[when(regex = r#"^a line locator is built with description \"(.+)\"$"#)]
fn line_locator(world: &mut LocatorWorld, description: String) {
    world.located = Some(test_line(&description, world.line));
}

#[then(regex = r#"^the locator is \"(.+)\"$"#)]
fn the_locator_is(world: &mut LocatorWorld, expected: String) {
    match world.located.take() {
        Some(located) => assert_eq!(located, expected),
        None => panic!("no locator built - test setup error"),
    }
}

#[then(regex = r#"^the locator starts with \"(.+)\"$"#)]
fn the_locator_starts_with(world: &mut LocatorWorld, prefix: String) {
    match world.located.take() {
        Some(located) => assert!(located.starts_with(&prefix), "{located}"),
        None => panic!("no locator built - test setup error"),
    }
}
