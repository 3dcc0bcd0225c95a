//! Palette generation.
//!
//! A [`GenerationRequest`] names how many colors to produce, which strategy
//! to use and which colors are locked. Hue strategies derive satellite colors
//! from the first locked color, merge them with every locked color, sort by
//! hue and sample an LCH scale through the result. Lightness strategies ramp
//! the first color toward white or black.
//!
//! With nothing locked, a seed is drawn from the generator's [`ColorSource`].
//! Inject a seeded source to make generation reproducible:
//!
//! ```
//! use hueforge::generator::{GenerationRequest, GenerationType, PaletteGenerator, RandomColors};
//!
//! let request = GenerationRequest::new(5, GenerationType::Analogous);
//! let a = PaletteGenerator::with_source(RandomColors::seeded(7)).generate(&request).unwrap();
//! let b = PaletteGenerator::with_source(RandomColors::seeded(7)).generate(&request).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 5);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::adjust::ColorblindAdjuster;
use crate::color::{Color, ColorParseError};
use crate::harmony;
use crate::scale::LchScale;
use crate::simulate::{MachadoSimulator, Simulator};

/// Generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationType {
    /// Seed plus neighbours at ±30°.
    #[default]
    Analogous,
    /// Seed plus +120° and +240°.
    Triadic,
    /// Seed plus +180°.
    Complementary,
    /// Seed blended toward white.
    Tints,
    /// Seed blended toward black.
    Shades,
    /// Plain interpolation through the locked colors.
    Scale,
}

impl GenerationType {
    /// Hue offsets of the satellites derived from the first seed color.
    #[must_use]
    pub const fn satellite_offsets(&self) -> &'static [f64] {
        match self {
            Self::Analogous => &[-30.0, 30.0],
            Self::Triadic => &[120.0, 240.0],
            Self::Complementary => &[180.0],
            Self::Tints | Self::Shades | Self::Scale => &[],
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Complementary => "complementary",
            Self::Tints => "tints",
            Self::Shades => "shades",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised names fall back to [`GenerationType::Scale`].
impl FromStr for GenerationType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "analogous" => Self::Analogous,
            "triadic" => Self::Triadic,
            "complementary" => Self::Complementary,
            "tints" => Self::Tints,
            "shades" => Self::Shades,
            _ => Self::Scale,
        })
    }
}

/// Input to [`PaletteGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    /// Exact length of the generated palette.
    pub num_colors: usize,
    pub kind: GenerationType,
    /// Color strings; validated before any work is done.
    pub locked_colors: Vec<String>,
    pub colorblind_safe: bool,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(num_colors: usize, kind: GenerationType) -> Self {
        Self {
            num_colors,
            kind,
            locked_colors: Vec::new(),
            colorblind_safe: false,
        }
    }

    /// Add a locked color.
    #[must_use]
    pub fn lock(mut self, color: impl Into<String>) -> Self {
        self.locked_colors.push(color.into());
        self
    }

    #[must_use]
    pub fn colorblind_safe(mut self, safe: bool) -> Self {
        self.colorblind_safe = safe;
        self
    }
}

/// A locked color failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColorError {
    /// Position in `locked_colors`.
    pub index: usize,
    pub input: String,
    pub reason: ColorParseError,
}

impl fmt::Display for InvalidColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid locked color #{} ({:?}): {}",
            self.index, self.input, self.reason
        )
    }
}

impl std::error::Error for InvalidColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Validate every locked color, stopping at the first failure.
///
/// # Errors
///
/// Returns [`InvalidColorError`] for the first string that does not parse.
pub fn parse_locked(locked: &[String]) -> Result<Vec<Color>, InvalidColorError> {
    locked
        .iter()
        .enumerate()
        .map(|(index, input)| {
            Color::parse(input).map_err(|reason| InvalidColorError {
                index,
                input: input.clone(),
                reason,
            })
        })
        .collect()
}

/// Supplies seed colors when nothing is locked.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

impl<S: ColorSource + ?Sized> ColorSource for &mut S {
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Uniformly random opaque colors.
#[derive(Debug, Clone)]
pub struct RandomColors<R = StdRng> {
    rng: R,
}

impl RandomColors<StdRng> {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic stream for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomColors<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        Color::from_rgb(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

/// Cycles through a fixed list; handy for tests and demos.
#[derive(Debug, Clone)]
pub struct FixedColors {
    colors: Vec<Color>,
    next: usize,
}

impl FixedColors {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors, next: 0 }
    }
}

impl ColorSource for FixedColors {
    fn next_color(&mut self) -> Color {
        let Some(&color) = self.colors.get(self.next % self.colors.len().max(1)) else {
            return Color::NEUTRAL_GRAY;
        };
        self.next = self.next.wrapping_add(1);
        color
    }
}

/// Produces palettes from [`GenerationRequest`]s.
#[derive(Debug, Clone)]
pub struct PaletteGenerator<S = RandomColors, M = MachadoSimulator> {
    source: S,
    adjuster: ColorblindAdjuster<M>,
}

impl PaletteGenerator {
    /// Generator with OS-seeded randomness and the default simulator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomColors::from_os())
    }
}

impl Default for PaletteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ColorSource> PaletteGenerator<S> {
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            adjuster: ColorblindAdjuster::new(),
        }
    }
}

impl<S: ColorSource, M: Simulator> PaletteGenerator<S, M> {
    /// Replace the adjuster used for `colorblind_safe` requests.
    #[must_use]
    pub fn adjuster<N: Simulator>(self, adjuster: ColorblindAdjuster<N>) -> PaletteGenerator<S, N> {
        PaletteGenerator {
            source: self.source,
            adjuster,
        }
    }

    /// Generate exactly `request.num_colors` colors.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColorError`] if any locked color is invalid; nothing is
    /// generated in that case.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(kind = %request.kind, num_colors = request.num_colors)
        )
    )]
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<Vec<Color>, InvalidColorError> {
        let locked = parse_locked(&request.locked_colors)?;

        if request.num_colors == 0 {
            return Ok(Vec::new());
        }

        let seeds = if locked.is_empty() {
            let seed = self.source.next_color();
            log::debug!(target: "hueforge::generator", "no locked colors, random seed {seed}");
            vec![seed]
        } else {
            locked
        };
        let first = seeds[0];

        let raw = match request.kind {
            GenerationType::Analogous | GenerationType::Triadic | GenerationType::Complementary => {
                let mut controls: SmallVec<[Color; 8]> = seeds.iter().copied().collect();
                controls.extend(
                    request
                        .kind
                        .satellite_offsets()
                        .iter()
                        .map(|&offset| first.rotate_hue(offset)),
                );
                harmony::sort_by_hue(&mut controls);
                LchScale::new(controls).colors(request.num_colors)
            }
            GenerationType::Tints => harmony::ramp(first, Color::WHITE, request.num_colors),
            GenerationType::Shades => harmony::ramp(first, Color::BLACK, request.num_colors),
            GenerationType::Scale => LchScale::new(seeds).colors(request.num_colors),
        };

        log::debug!(
            target: "hueforge::generator",
            "generated {} {} color(s) from {}",
            raw.len(),
            request.kind,
            first
        );

        if request.colorblind_safe {
            Ok(self.adjuster.adjust(&raw))
        } else {
            Ok(raw)
        }
    }
}

/// Generate a palette with OS-seeded randomness.
///
/// # Errors
///
/// See [`PaletteGenerator::generate`].
pub fn generate_palette(request: &GenerationRequest) -> Result<Vec<Color>, InvalidColorError> {
    PaletteGenerator::new().generate(request)
}
