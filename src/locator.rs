//! Caller locators for diagnostic messages.
//!
//! Each formatter renders a `location:line : description` string. The line is
//! zero-padded to four digits. When a description is given it is appended
//! after a second ` : ` separator, so the separator appears twice:
//!
//! ```
//! use caplog::locator::{path_line, test_line};
//!
//! assert_eq!(path_line("sum", "/src/calc.rs", 7), "/src/calc.rs:0007 :  : sum");
//! assert_eq!(test_line("", 42), "0042 : ");
//! ```
//!
//! The `path_line!` family of macros fills in `file!()` and `line!()` at the
//! call site, and [`Locator::caller`] does the same through `#[track_caller]`.

use std::fmt;
use std::panic::Location;
use std::sync::OnceLock;

use regex::Regex;

/// Offset from the start of a test directory match at which relative paths
/// begin.
const TEST_DIR_SKIP: usize = 6;

static TEST_DIR_REGEX: OnceLock<Regex> = OnceLock::new();

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
fn test_dir_regex() -> &'static Regex {
    TEST_DIR_REGEX.get_or_init(|| Regex::new(r"(?i)[/\\]tests?[/\\]").expect("test dir regex"))
}

fn describe(location: &str, line: u32, description: &str) -> String {
    if description.is_empty() {
        format!("{location}:{line:04} : ")
    } else {
        format!("{location}:{line:04} :  : {description}")
    }
}

/// Locator built from the full source path.
///
/// # Examples
///
/// ```
/// use caplog::locator::path_line;
///
/// assert_eq!(path_line("", "/src/calc.rs", 12), "/src/calc.rs:0012 : ");
/// ```
#[must_use]
pub fn path_line(description: &str, path: &str, line: u32) -> String {
    describe(path, line, description)
}

/// Locator built from the path below the first `test` or `tests` directory.
///
/// The match is case-insensitive and accepts either separator. Paths without
/// such a directory are rendered unchanged.
///
/// # Examples
///
/// ```
/// use caplog::locator::relative_path_line;
///
/// assert_eq!(
///     relative_path_line("", "/repo/Test/unit/calc.rs", 3),
///     "unit/calc.rs:0003 : "
/// );
/// ```
#[must_use]
pub fn relative_path_line(description: &str, path: &str, line: u32) -> String {
    describe(relative_path(path), line, description)
}

/// Locator built from the file name alone.
#[must_use]
pub fn test_file_line(description: &str, path: &str, line: u32) -> String {
    describe(file_name(path), line, description)
}

/// Locator built from the line number alone.
#[must_use]
pub fn test_line(description: &str, line: u32) -> String {
    if description.is_empty() {
        format!("{line:04} : ")
    } else {
        format!("{line:04} :  : {description}")
    }
}

fn relative_path(path: &str) -> &str {
    test_dir_regex()
        .find(path)
        .and_then(|m| path.get(m.start() + TEST_DIR_SKIP..))
        .unwrap_or(path)
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// A captured source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locator {
    path: &'static str,
    line: u32,
}

impl Locator {
    /// Build a locator from an explicit path and line.
    #[must_use]
    pub const fn new(path: &'static str, line: u32) -> Self {
        Self { path, line }
    }

    /// Capture the location of the caller.
    ///
    /// Functions marked `#[track_caller]` forward their own caller, so helper
    /// assertions report the line in the test rather than in the helper.
    ///
    /// # Examples
    ///
    /// ```
    /// use caplog::Locator;
    ///
    /// let here = Locator::caller();
    /// assert_eq!(here.line(), line!() - 1);
    /// assert!(here.path_line("ok").ends_with(" :  : ok"));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// See [`path_line`].
    #[must_use]
    pub fn path_line(&self, description: &str) -> String {
        path_line(description, self.path, self.line)
    }

    /// See [`relative_path_line`].
    #[must_use]
    pub fn relative_path_line(&self, description: &str) -> String {
        relative_path_line(description, self.path, self.line)
    }

    /// See [`test_file_line`].
    #[must_use]
    pub fn test_file_line(&self, description: &str) -> String {
        test_file_line(description, self.path, self.line)
    }

    /// See [`test_line`].
    #[must_use]
    pub fn test_line(&self, description: &str) -> String {
        test_line(description, self.line)
    }
}

impl From<&'static Location<'static>> for Locator {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_line(""))
    }
}

/// Expand to [`path_line`](crate::locator::path_line) for the call site.
///
/// Accepts no arguments, a `format!` string followed by its arguments, or any
/// expression that is `AsRef<str>`. A string literal on its own is used
/// verbatim, braces included.
///
/// ```
/// let at = caplog::path_line!("value was {}", 3);
/// assert!(at.ends_with(" :  : value was 3"));
///
/// assert!(caplog::path_line!("map {a: 1}").ends_with(" :  : map {a: 1}"));
///
/// let what = String::from("sum");
/// assert!(caplog::path_line!(what).ends_with(" :  : sum"));
/// ```
#[macro_export]
macro_rules! path_line {
    () => {
        $crate::locator::path_line("", ::core::file!(), ::core::line!())
    };
    ($fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::locator::path_line(
            &::std::format!($fmt, $($arg),+),
            ::core::file!(),
            ::core::line!(),
        )
    };
    ($description:expr $(,)?) => {
        $crate::locator::path_line(
            ::core::convert::AsRef::<str>::as_ref(&$description),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Expand to [`relative_path_line`](crate::locator::relative_path_line) for
/// the call site.
#[macro_export]
macro_rules! relative_path_line {
    () => {
        $crate::locator::relative_path_line("", ::core::file!(), ::core::line!())
    };
    ($fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::locator::relative_path_line(
            &::std::format!($fmt, $($arg),+),
            ::core::file!(),
            ::core::line!(),
        )
    };
    ($description:expr $(,)?) => {
        $crate::locator::relative_path_line(
            ::core::convert::AsRef::<str>::as_ref(&$description),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Expand to [`test_file_line`](crate::locator::test_file_line) for the call
/// site.
#[macro_export]
macro_rules! test_file_line {
    () => {
        $crate::locator::test_file_line("", ::core::file!(), ::core::line!())
    };
    ($fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::locator::test_file_line(
            &::std::format!($fmt, $($arg),+),
            ::core::file!(),
            ::core::line!(),
        )
    };
    ($description:expr $(,)?) => {
        $crate::locator::test_file_line(
            ::core::convert::AsRef::<str>::as_ref(&$description),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Expand to [`test_line`](crate::locator::test_line) for the call site.
#[macro_export]
macro_rules! test_line {
    () => {
        $crate::locator::test_line("", ::core::line!())
    };
    ($fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::locator::test_line(&::std::format!($fmt, $($arg),+), ::core::line!())
    };
    ($description:expr $(,)?) => {
        $crate::locator::test_line(
            ::core::convert::AsRef::<str>::as_ref(&$description),
            ::core::line!(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single_digit(7, "0007")]
    #[case::zero(0, "0000")]
    #[case::four_digits(1234, "1234")]
    #[case::wider(123_456, "123456")]
    fn line_is_zero_padded(#[case] line: u32, #[case] expected: &str) {
        assert_eq!(test_line("", line), format!("{expected} : "));
    }

    #[test]
    fn path_line_keeps_full_path() {
        assert_eq!(
            path_line("adds numbers", "/home/dev/repo/tests/calc.rs", 7),
            "/home/dev/repo/tests/calc.rs:0007 :  : adds numbers"
        );
    }

    #[test]
    fn empty_description_leaves_trailing_separator() {
        assert_eq!(path_line("", "a.rs", 1), "a.rs:0001 : ");
    }

    #[rstest]
    #[case::tests_dir("/repo/tests/foo/bar.rs", "/foo/bar.rs")]
    #[case::test_dir("/repo/test/foo/bar.rs", "foo/bar.rs")]
    #[case::upper_case("/repo/TESTS/foo/bar.rs", "/foo/bar.rs")]
    #[case::windows(r"C:\repo\Tests\foo\bar.rs", r"\foo\bar.rs")]
    #[case::mixed_separators(r"C:\repo\test/foo.rs", "foo.rs")]
    #[case::first_match_wins("/a/tests/b/test/c.rs", "/b/test/c.rs")]
    fn relative_path_strips_test_dir(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(
            relative_path_line("", path, 5),
            format!("{expected}:0005 : ")
        );
    }

    #[rstest]
    #[case::no_test_dir("/repo/src/lib.rs")]
    #[case::test_prefix_only("/repo/testing/lib.rs")]
    #[case::test_suffix_only("/repo/unit_tests/lib.rs")]
    #[case::empty("")]
    fn relative_path_without_test_dir_is_unchanged(#[case] path: &str) {
        assert_eq!(
            relative_path_line("d", path, 9),
            path_line("d", path, 9)
        );
    }

    #[rstest]
    #[case::unix("/a/b/c/File.ext")]
    #[case::windows(r"C:\a\b\File.ext")]
    #[case::bare("File.ext")]
    fn test_file_line_uses_file_name(#[case] path: &str) {
        let located = test_file_line("x", path, 3);
        assert!(located.starts_with("File.ext:"), "{located}");
        assert_eq!(located, "File.ext:0003 :  : x");
    }

    #[test]
    fn test_line_ignores_path() {
        assert_eq!(test_line("why", 12), "0012 :  : why");
        assert_eq!(
            Locator::new("/x/y.rs", 12).test_line("why"),
            Locator::new("/other.rs", 12).test_line("why")
        );
    }

    #[test]
    fn caller_captures_this_file() {
        let here = Locator::caller();
        assert_eq!(here.path(), file!());
        assert_eq!(here.line(), line!() - 2);
    }

    #[track_caller]
    fn located_helper() -> Locator {
        Locator::caller()
    }

    #[test]
    fn caller_is_forwarded_through_track_caller() {
        let line = line!() + 1;
        let located = located_helper();
        assert_eq!(located.line(), line);
    }

    #[test]
    fn display_matches_path_line() {
        let locator = Locator::new("src/a.rs", 8);
        assert_eq!(locator.to_string(), "src/a.rs:0008 : ");
    }

    #[test]
    fn macros_use_call_site() {
        let line = line!() + 1;
        let located = crate::path_line!("n={}", 1);
        assert_eq!(located, path_line("n=1", file!(), line));

        let line = line!() + 1;
        assert_eq!(crate::test_line!(), test_line("", line));

        let line = line!() + 1;
        let located = crate::test_file_line!("ok");
        assert_eq!(located, format!("locator.rs:{line:04} :  : ok"));

        let line = line!() + 1;
        let located = crate::relative_path_line!();
        assert_eq!(located, relative_path_line("", file!(), line));

        let description = String::from("owned");
        let line = line!() + 1;
        let located = crate::test_line!(description);
        assert_eq!(located, test_line("owned", line));
    }

    #[test]
    fn lone_literal_is_used_verbatim() {
        let line = line!() + 1;
        let located = crate::test_line!("map {a: 1}");
        assert_eq!(located, test_line("map {a: 1}", line));

        let line = line!() + 1;
        let located = crate::path_line!("{braces} stay",);
        assert_eq!(located, path_line("{braces} stay", file!(), line));
    }
}
