//! Common test utilities and logging infrastructure
//!
//! Integration tests import this module and call [`init_test_logging`] at the
//! start of any test whose failures benefit from a log:
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=hueforge::adjust=trace` - Per-nudge adjuster output
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

pub mod assertions;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hueforge::palette::SavedPalette;

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Installs a tracing subscriber writing through the test writer, so output
/// is captured unless `--nocapture` is passed. `log` records from the library
/// reach it through tracing-subscriber's `log` compatibility. Idempotent.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hueforge=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A test span guard that logs entry.
///
/// ```rust,ignore
/// let _setup = test_phase("setup");
/// ```
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Circular distance between two hues, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// A small saved-palette corpus covering every categorizer branch.
pub fn sample_corpus() -> Vec<SavedPalette> {
    vec![
        SavedPalette::new("1", "RGB Primary", ["#FF0000", "#00FF00", "#0000FF"]),
        SavedPalette::new("2", "Sunset", ["#FFCC80", "#FFA726", "#FB8C00"]),
        SavedPalette::new("3", "Empty", Vec::<String>::new()),
        SavedPalette::new("4", "Japan Flag", ["#FFFFFF", "#BC002D"]),
        SavedPalette::new("5", "Starbucks", ["#00704A", "#27251F"]),
        SavedPalette::new("6", "Graphite", ["#222222", "#555555", "#888888"]),
        SavedPalette::new("7", "Deep Sea", ["#003f88", "#00509d", "#1b6ac9"]),
        SavedPalette::new("8", "Forest", ["#1b4332", "#2d6a4f", "#40916c", "nonsense"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_phase_logging() {
        init_test_logging();
        let _setup = test_phase("setup");
        tracing::debug!("Setting up test resources");
    }

    #[test]
    fn test_circular_distance() {
        assert!((circular_distance(350.0, 10.0) - 20.0).abs() < 1e-9);
    }
}
