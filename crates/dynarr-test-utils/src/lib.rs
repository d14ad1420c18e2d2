//! Test harness utilities for dynarr development.
//!
//! A test is a plain `fn() -> TestResult`: `Ok(())` on success, or a
//! failure description. Tests are registered by name in a [`TestGroup`]
//! and run independently; [`GroupReport`] collects the labelled failures.
//! The [`fail!`] and [`check!`] macros build descriptions that carry the
//! source location.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod group;

pub use group::{DuplicateTest, Failure, GroupReport, TestFn, TestGroup, TestResult};

/// Format a failure description as `file:line: message`.
///
/// An empty message yields just the location, so descriptions are never empty.
pub fn failure_message(file: &str, line: u32, message: String) -> String {
    if message.is_empty() {
        format!("{file}:{line}")
    } else {
        format!("{file}:{line}: {message}")
    }
}

/// Return a failure from the enclosing test function.
///
/// ```ignore
/// if array.len() != 1 {
///     fail!("expected length 1, got {}", array.len());
/// }
/// ```
#[macro_export]
macro_rules! fail {
    () => {
        return Err($crate::failure_message(file!(), line!(), String::new()))
    };
    ($($arg:tt)+) => {
        return Err($crate::failure_message(file!(), line!(), format!($($arg)+)))
    };
}

/// Fail the enclosing test function unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            $crate::fail!("check failed: {}", stringify!($cond));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail!($($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_fails() -> TestResult {
        fail!("value was {}", 3);
    }

    fn checks(x: i32) -> TestResult {
        check!(x > 0);
        check!(x < 10, "x too large: {}", x);
        Ok(())
    }

    #[test]
    fn fail_carries_location_and_message() {
        let err = always_fails().unwrap_err();
        assert!(err.contains("lib.rs:"), "{err}");
        assert!(err.ends_with("value was 3"), "{err}");
    }

    #[test]
    fn check_reports_condition_text() {
        assert_eq!(checks(5), Ok(()));
        assert!(checks(-1).unwrap_err().ends_with("check failed: x > 0"));
        assert!(checks(11).unwrap_err().ends_with("x too large: 11"));
    }

    #[test]
    fn empty_message_is_just_location() {
        assert_eq!(failure_message("a.rs", 7, String::new()), "a.rs:7");
    }
}
