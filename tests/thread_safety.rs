//! Thread safety tests for hueforge.
//!
//! This module verifies:
//! 1. All public types are Send + Sync (compile-time verification)
//! 2. The color parse cache and keyword table work under concurrent access
//! 3. Independent generators can run in parallel

use hueforge::prelude::*;
use std::sync::Arc;
use std::thread;

// ============================================================================
// COMPILE-TIME SEND + SYNC VERIFICATION
// ============================================================================

/// Helper function to verify a type is Send + Sync at compile time.
fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_color_types_are_send_sync() {
    assert_send_sync::<Color>();
    assert_send_sync::<Hsl>();
    assert_send_sync::<Lab>();
    assert_send_sync::<Lch>();
    assert_send_sync::<ColorParseError>();
    assert_send_sync::<LchScale>();
}

#[test]
fn test_generation_types_are_send_sync() {
    assert_send_sync::<GenerationRequest>();
    assert_send_sync::<GenerationType>();
    assert_send_sync::<InvalidColorError>();
    assert_send_sync::<PaletteGenerator>();
    assert_send_sync::<ColorblindAdjuster>();
    assert_send_sync::<AdjustReport>();
    assert_send_sync::<Deficiencies>();
}

#[test]
fn test_categorizer_types_are_send_sync() {
    assert_send_sync::<Categorizer>();
    assert_send_sync::<KeywordTable>();
    assert_send_sync::<Category>();
    assert_send_sync::<Palette>();
    assert_send_sync::<SavedPalette>();
}

#[test]
fn test_logger_is_send_sync() {
    assert_send_sync::<PaletteLogger>();
}

// ============================================================================
// CONCURRENT ACCESS
// ============================================================================

#[test]
fn test_concurrent_color_parsing() {
    let handles: Vec<_> = (0..8)
        .map(|t| {
            thread::spawn(move || {
                for i in 0..200u32 {
                    let value = (t * 200 + i) % 256;
                    let hex = format!("#{value:02x}{value:02x}{value:02x}");
                    let color = Color::parse(&hex).unwrap();
                    assert_eq!(color.hex(), hex);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("parser thread panicked");
    }
}

#[test]
fn test_concurrent_categorization_shares_keywords() {
    let categorizer = Arc::new(Categorizer::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let categorizer = Arc::clone(&categorizer);
            thread::spawn(move || {
                for _ in 0..50 {
                    assert_eq!(
                        categorizer.categorize(&["#FFCC80", "#FFA726", "#FB8C00"], "Sunset"),
                        Category::Orange
                    );
                    assert_eq!(categorize(&["#000000"], "Sweden flag"), Category::Flags);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("categorizer thread panicked");
    }
}

#[test]
fn test_parallel_seeded_generators_agree() {
    let request = GenerationRequest::new(6, GenerationType::Triadic).colorblind_safe(true);
    let results: Vec<Vec<Color>> = (0..4)
        .map(|_| {
            let request = request.clone();
            thread::spawn(move || {
                PaletteGenerator::with_source(RandomColors::seeded(99))
                    .generate(&request)
                    .unwrap()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("generator thread panicked"))
        .collect();

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].len(), 6);
}
