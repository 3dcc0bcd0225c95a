//! Integration tests for the `log` backend.
//!
//! Installs a [`PaletteLogger`] as the process-wide logger, so every check
//! lives in a single test function. The shared `common` module is left out
//! because its tracing setup would claim the global logger first.
//!
//! Run with: cargo test --test logging_test -- --nocapture

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use hueforge::color::Color;
use hueforge::generator::{GenerationRequest, GenerationType, generate_palette};
use hueforge::logging::PaletteLogger;
use hueforge::simulate::{SimulationError, SimulationType, Simulator, simulate_with};
use log::LevelFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Offline;

impl Simulator for Offline {
    fn try_simulate(&self, _: Color, _: SimulationType) -> Result<Color, SimulationError> {
        Err(SimulationError::Model("offline".to_string()))
    }
}

#[test]
fn test_library_records_reach_palette_logger() {
    let capture = Capture::default();
    let logger = PaletteLogger::with_writer(capture.clone())
        .level(LevelFilter::Debug)
        .show_time(false)
        .show_target(true);
    logger.init().expect("install logger");

    // Simulation failures are logged and degrade to black.
    let out = simulate_with(&Offline, Color::from_rgb(10, 20, 30), SimulationType::Tritan);
    assert_eq!(out, Color::BLACK);

    let request = GenerationRequest::new(4, GenerationType::Shades).lock("#3366cc");
    generate_palette(&request).expect("generate");

    // Trace records are filtered by the configured level.
    log::trace!(target: "hueforge::test", "should not appear");

    let text = capture.text();
    assert!(
        text.contains("WARN  hueforge::simulate: simulation model failed: offline; falling back to black"),
        "{text}"
    );
    assert!(
        text.contains("DEBUG hueforge::generator: generated 4 shades color(s) from #3366cc"),
        "{text}"
    );
    assert!(!text.contains("should not appear"));

    // A second logger cannot be installed.
    assert!(PaletteLogger::new().init().is_err());
}
