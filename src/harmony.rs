//! Color harmony primitives.
//!
//! Hue relationships rotate the seed's HSL hue by fixed offsets while holding
//! saturation and lightness, then sort the result by ascending hue. The
//! lightness variants (tints, shades, tones) blend the seed toward white,
//! black or neutral gray.
//!
//! ```
//! use hueforge::color::Color;
//! use hueforge::harmony;
//!
//! let red = Color::from_rgb(255, 0, 0);
//! let pair = harmony::complementary(red);
//! assert_eq!(pair, vec![red, Color::from_rgb(0, 255, 255)]);
//! ```

use crate::color::{Color, Hsl};

pub const COMPLEMENTARY_OFFSETS: [f64; 2] = [0.0, 180.0];
pub const ANALOGOUS_OFFSETS: [f64; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
pub const SPLIT_COMPLEMENTARY_OFFSETS: [f64; 3] = [0.0, 150.0, 210.0];
pub const TRIADIC_OFFSETS: [f64; 3] = [0.0, 120.0, 240.0];
pub const SQUARE_OFFSETS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
pub const RECTANGULAR_OFFSETS: [f64; 4] = [0.0, 30.0, 180.0, 210.0];

/// Rotate `seed` by each offset and sort by ascending hue.
#[must_use]
pub fn rotations(seed: Color, offsets: &[f64]) -> Vec<Color> {
    let hsl = seed.to_hsl();
    let mut colors: Vec<Color> = offsets
        .iter()
        .map(|offset| {
            Color::from_hsl(Hsl {
                hue: (hsl.hue + offset + 360.0) % 360.0,
                ..hsl
            })
        })
        .collect();
    sort_by_hue(&mut colors);
    colors
}

/// Stable sort by HSL hue; grays sort as hue 0.
pub fn sort_by_hue(colors: &mut [Color]) {
    colors.sort_by(|a, b| a.to_hsl().hue.total_cmp(&b.to_hsl().hue));
}

#[must_use]
pub fn complementary(seed: Color) -> Vec<Color> {
    rotations(seed, &COMPLEMENTARY_OFFSETS)
}

/// Five colors 30° apart, centred on the seed.
#[must_use]
pub fn analogous(seed: Color) -> Vec<Color> {
    rotations(seed, &ANALOGOUS_OFFSETS)
}

/// The seed plus the two neighbours of its complement (±30°).
#[must_use]
pub fn split_complementary(seed: Color) -> Vec<Color> {
    rotations(seed, &SPLIT_COMPLEMENTARY_OFFSETS)
}

#[must_use]
pub fn triadic(seed: Color) -> Vec<Color> {
    rotations(seed, &TRIADIC_OFFSETS)
}

#[must_use]
pub fn square(seed: Color) -> Vec<Color> {
    rotations(seed, &SQUARE_OFFSETS)
}

/// Tetradic harmony: two complementary pairs 30° apart.
#[must_use]
pub fn rectangular(seed: Color) -> Vec<Color> {
    rotations(seed, &RECTANGULAR_OFFSETS)
}

/// Blend `seed` toward `target` in `steps` evenly spaced fractions.
///
/// Unlike [`tints`] and friends this never deduplicates, so the result always
/// has `max(steps, 1)` entries with `seed` first.
#[must_use]
pub fn ramp(seed: Color, target: Color, steps: usize) -> Vec<Color> {
    if steps <= 1 {
        return vec![seed];
    }
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| seed.mix(target, i as f64 / last))
        .collect()
}

/// Remove repeated colors, keeping the first occurrence of each.
#[must_use]
pub fn dedup_stable(colors: Vec<Color>) -> Vec<Color> {
    let mut out: Vec<Color> = Vec::with_capacity(colors.len());
    for color in colors {
        if !out.contains(&color) {
            out.push(color);
        }
    }
    out
}

/// Lighter variants of `seed`, ending in white.
#[must_use]
pub fn tints(seed: Color, steps: usize) -> Vec<Color> {
    dedup_stable(ramp(seed, Color::WHITE, steps))
}

/// Darker variants of `seed`, ending in black.
#[must_use]
pub fn shades(seed: Color, steps: usize) -> Vec<Color> {
    dedup_stable(ramp(seed, Color::BLACK, steps))
}

/// Desaturated variants of `seed`, ending in neutral gray.
#[must_use]
pub fn tones(seed: Color, steps: usize) -> Vec<Color> {
    dedup_stable(ramp(seed, Color::NEUTRAL_GRAY, steps))
}
