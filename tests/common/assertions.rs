//! Logged assertion helpers for hueforge tests.
//!
//! Each helper records the compared values through `tracing` before
//! asserting, so a failing CI run shows the context in its captured log.

#![allow(dead_code)]

use std::fmt::Debug;

use hueforge::color::Color;

use super::circular_distance;

/// Assert equality with detailed logging.
///
/// ```rust,ignore
/// assert_eq_logged("palette length", colors.len(), 5);
/// ```
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

#[track_caller]
pub fn assert_true_logged(context: &str, value: bool) {
    tracing::debug!(context = context, value = value, "asserting true");

    if !value {
        tracing::error!(context = context, "assertion failed: expected true");
    }

    assert!(value, "{context}: expected true, got false");
}

/// Assert that a Result is Ok and return the value.
#[track_caller]
pub fn assert_ok_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> T {
    tracing::debug!(context = context, result = ?result, "asserting Ok");

    match result {
        Ok(value) => value,
        Err(ref e) => {
            tracing::error!(context = context, error = ?e, "assertion failed: expected Ok, got Err");
            panic!("{context}: expected Ok, got Err({e:?})");
        }
    }
}

/// Assert that a Result is Err and return the error.
///
/// ```rust,ignore
/// let err = assert_err_logged("bad lock", generate_palette(&request));
/// ```
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    tracing::debug!(context = context, result = ?result, "asserting Err");

    match result {
        Err(e) => e,
        Ok(ref value) => {
            tracing::error!(
                context = context,
                value = ?value,
                "assertion failed: expected Err, got Ok"
            );
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(
        context = context,
        haystack_len = haystack.len(),
        needle = needle,
        "asserting contains"
    );

    if !haystack.contains(needle) {
        tracing::error!(
            context = context,
            haystack = haystack,
            needle = needle,
            "assertion failed: string does not contain substring"
        );
        panic!("{context}: expected string to contain {needle:?}.\nString: {haystack:?}");
    }
}

/// Assert approximate equality for floating point values.
#[track_caller]
pub fn assert_approx_eq_logged(context: &str, actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    tracing::debug!(
        context = context,
        expected = expected,
        actual = actual,
        diff = diff,
        "asserting approximate equality"
    );

    if diff > epsilon {
        tracing::error!(
            context = context,
            expected = expected,
            actual = actual,
            "assertion failed: values not approximately equal"
        );
        panic!("{context}: expected {expected} (within {epsilon}), got {actual} (diff: {diff})");
    }
}

#[track_caller]
pub fn assert_len_logged<T>(context: &str, slice: &[T], expected_len: usize) {
    let actual_len = slice.len();
    tracing::debug!(
        context = context,
        expected_len = expected_len,
        actual_len = actual_len,
        "asserting length"
    );

    if actual_len != expected_len {
        tracing::error!(context = context, "assertion failed: unexpected length");
        panic!("{context}: expected length {expected_len}, got {actual_len}");
    }
}

/// Assert that two colors' HSL hues are `degrees` apart on the wheel.
#[track_caller]
pub fn assert_hue_gap_logged(context: &str, a: Color, b: Color, degrees: f64, tolerance: f64) {
    let gap = circular_distance(a.to_hsl().hue, b.to_hsl().hue);
    tracing::debug!(
        context = context,
        a = %a,
        b = %b,
        gap = gap,
        "asserting hue gap"
    );

    if (gap - degrees).abs() > tolerance {
        tracing::error!(context = context, gap = gap, "assertion failed: hue gap");
        panic!("{context}: {a} and {b} are {gap}° apart, expected {degrees}° ± {tolerance}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::init_test_logging;

    #[test]
    fn test_assert_eq_logged_pass() {
        init_test_logging();
        assert_eq_logged("simple equality", 42, 42);
    }

    #[test]
    #[should_panic(expected = "expected 42")]
    fn test_assert_eq_logged_fail() {
        init_test_logging();
        assert_eq_logged("will fail", 0, 42);
    }

    #[test]
    fn test_assert_hue_gap_logged_pass() {
        init_test_logging();
        assert_hue_gap_logged(
            "red vs cyan",
            Color::from_rgb(255, 0, 0),
            Color::from_rgb(0, 255, 255),
            180.0,
            0.5,
        );
    }

    #[test]
    #[should_panic(expected = "apart")]
    fn test_assert_hue_gap_logged_fail() {
        init_test_logging();
        assert_hue_gap_logged(
            "red vs green",
            Color::from_rgb(255, 0, 0),
            Color::from_rgb(0, 255, 0),
            180.0,
            0.5,
        );
    }
}
