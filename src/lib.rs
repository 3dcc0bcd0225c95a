//! # hueforge
//!
//! Palette generation, color harmony and colorblind-safety adjustment.
//!
//! ## Quick Start
//!
//! ```rust
//! use hueforge::prelude::*;
//!
//! let request = GenerationRequest::new(5, GenerationType::Triadic)
//!     .lock("#e4572e")
//!     .colorblind_safe(true);
//! let colors = generate_palette(&request).unwrap();
//! assert_eq!(colors.len(), 5);
//!
//! let hex: Vec<String> = colors.iter().map(Color::hex).collect();
//! let category = categorize(&hex, "Campfire");
//! println!("{category}: {hex:?}");
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: 8-bit sRGB value with HSL, Lab and LCH conversions
//! - **Harmony**: hue rotations (complementary, triadic, ...) and lightness ramps
//! - **Simulation**: how a color looks under protan, deutan or tritan vision
//! - **Generator**: turns a request and locked colors into a palette
//! - **Adjuster**: nudges lightness until adjacent colors stay distinguishable
//! - **Categorizer**: labels saved palettes by name keywords and hue statistics

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adjust;
pub mod analyze;
pub mod categorize;
pub mod color;
pub mod contrast;
pub mod generator;
pub mod harmony;
pub mod logging;
pub mod palette;
pub mod scale;
pub mod simulate;
pub mod sync;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::adjust::{AdjustOptions, AdjustReport, ColorblindAdjuster, Deficiencies, adjust};
    pub use crate::analyze::{Harmony, detect_harmony, is_triadic};
    pub use crate::categorize::{
        Categorizer, CategorizerProfile, Category, HueMode, KeywordTable, categorize,
        categorize_corpus,
    };
    pub use crate::color::{Color, ColorParseError, Hsl, Lab, Lch};
    pub use crate::contrast::{ContrastReport, WcagLevel, readable_text_color};
    pub use crate::generator::{
        ColorSource, GenerationRequest, GenerationType, InvalidColorError, PaletteGenerator,
        RandomColors, generate_palette,
    };
    pub use crate::harmony;
    pub use crate::logging::PaletteLogger;
    pub use crate::palette::{Palette, PaletteColor, SavedPalette};
    pub use crate::scale::LchScale;
    pub use crate::simulate::{MachadoSimulator, SimulationType, Simulator, simulate};

    #[cfg(feature = "json")]
    pub use crate::palette::CorpusError;

    #[cfg(feature = "tracing")]
    pub use crate::logging::PaletteTracingLayer;
}

// Re-export key types at crate root
pub use adjust::ColorblindAdjuster;
pub use categorize::{Category, categorize};
pub use color::{Color, ColorParseError};
pub use generator::{GenerationRequest, GenerationType, InvalidColorError, generate_palette};
pub use palette::{Palette, SavedPalette};
pub use simulate::{SimulationType, simulate};
