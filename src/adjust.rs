//! Colorblind-safety adjustment.
//!
//! Walks a palette left to right and pushes each color's HSL lightness away
//! from its predecessor until the pair stays distinguishable under protan,
//! deutan and tritan simulation, or the attempt budget runs out. Only the
//! trailing color of a pair moves, and earlier pairs are never revisited, so
//! safety is attempted per adjacent pair and is best-effort.
//!
//! Hue and saturation of every color are held; the only drift is 8-bit
//! channel rounding.

use bitflags::bitflags;

use crate::color::Color;
use crate::simulate::{ALL_DEFICIENCIES, MachadoSimulator, SimulationType, Simulator, simulate_with};

bitflags! {
    /// Set of color-vision deficiencies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Deficiencies: u8 {
        const PROTAN = 1 << 0;
        const DEUTAN = 1 << 1;
        const TRITAN = 1 << 2;
    }
}

impl Deficiencies {
    /// The flag for one simulation type (empty for `Normal`).
    #[must_use]
    pub const fn from_simulation(kind: SimulationType) -> Self {
        match kind {
            SimulationType::Normal => Self::empty(),
            SimulationType::Protan => Self::PROTAN,
            SimulationType::Deutan => Self::DEUTAN,
            SimulationType::Tritan => Self::TRITAN,
        }
    }
}

/// Tunables for [`ColorblindAdjuster`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustOptions {
    /// Minimum simulated contrast ratio for a pair to count as safe.
    pub min_contrast: f64,
    /// Nudges allowed per pair before giving up.
    pub max_attempts: usize,
    /// HSL lightness points moved per nudge.
    pub lightness_step: f64,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            min_contrast: 1.2,
            max_attempts: 30,
            lightness_step: 2.0,
        }
    }
}

/// What happened to one adjacent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOutcome {
    /// Index of the leading color; the pair is `(index, index + 1)`.
    pub index: usize,
    /// Number of nudges applied to the trailing color.
    pub attempts: usize,
    /// Deficiencies under which the pair is still too close.
    pub unresolved: Deficiencies,
}

impl PairOutcome {
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Adjusted colors plus per-pair outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustReport {
    pub colors: Vec<Color>,
    pub pairs: Vec<PairOutcome>,
}

impl AdjustReport {
    /// True when every adjacent pair reached the contrast threshold.
    #[must_use]
    pub fn all_safe(&self) -> bool {
        self.pairs.iter().all(PairOutcome::is_safe)
    }
}

/// Greedy adjacent-pair lightness adjuster.
#[derive(Debug, Clone, Default)]
pub struct ColorblindAdjuster<M = MachadoSimulator> {
    simulator: M,
    options: AdjustOptions,
}

impl ColorblindAdjuster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Simulator> ColorblindAdjuster<M> {
    /// Use a custom dichromacy model.
    #[must_use]
    pub fn with_simulator(simulator: M) -> Self {
        Self {
            simulator,
            options: AdjustOptions::default(),
        }
    }

    #[must_use]
    pub fn options(mut self, options: AdjustOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn simulator(&self) -> &M {
        &self.simulator
    }

    /// Deficiencies under which `a` and `b` fall below the contrast threshold.
    #[must_use]
    pub fn unsafe_deficiencies(&self, a: Color, b: Color) -> Deficiencies {
        ALL_DEFICIENCIES
            .iter()
            .filter(|&&kind| {
                let sa = simulate_with(&self.simulator, a, kind);
                let sb = simulate_with(&self.simulator, b, kind);
                sa.contrast_ratio(sb) < self.options.min_contrast
            })
            .fold(Deficiencies::empty(), |acc, &kind| {
                acc | Deficiencies::from_simulation(kind)
            })
    }

    /// Returns true if the pair is distinguishable under every deficiency.
    #[must_use]
    pub fn is_pair_safe(&self, a: Color, b: Color) -> bool {
        self.unsafe_deficiencies(a, b).is_empty()
    }

    /// Adjust a palette; the input is left untouched.
    #[must_use]
    pub fn adjust(&self, colors: &[Color]) -> Vec<Color> {
        self.adjust_with_report(colors).colors
    }

    /// Adjust a palette and report how each adjacent pair fared.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(len = colors.len())))]
    #[must_use]
    pub fn adjust_with_report(&self, colors: &[Color]) -> AdjustReport {
        let mut out = colors.to_vec();
        let mut pairs = Vec::with_capacity(out.len().saturating_sub(1));

        for index in 0..out.len().saturating_sub(1) {
            let prev = out[index];
            let prev_l = prev.to_hsl().lightness;
            let mut hsl = out[index + 1].to_hsl();
            let mut unresolved = self.unsafe_deficiencies(prev, out[index + 1]);
            let mut attempts = 0;

            while !unresolved.is_empty() && attempts < self.options.max_attempts {
                attempts += 1;
                let step = if hsl.lightness > prev_l {
                    self.options.lightness_step
                } else {
                    -self.options.lightness_step
                };
                hsl.lightness = (hsl.lightness + step).clamp(0.0, 100.0);
                out[index + 1] = Color::from_hsl(hsl);
                log::trace!(
                    target: "hueforge::adjust",
                    "pair {index}: attempt {attempts} moved lightness to {:.1}",
                    hsl.lightness
                );
                unresolved = self.unsafe_deficiencies(prev, out[index + 1]);
            }

            if unresolved.is_empty() {
                if attempts > 0 {
                    log::debug!(
                        target: "hueforge::adjust",
                        "pair {index} separated after {attempts} attempt(s)"
                    );
                }
            } else {
                log::debug!(
                    target: "hueforge::adjust",
                    "pair {index} still too close after {attempts} attempt(s): {unresolved:?}"
                );
            }

            pairs.push(PairOutcome {
                index,
                attempts,
                unresolved,
            });
        }

        AdjustReport { colors: out, pairs }
    }
}

/// Adjust `colors` with the default model and options.
#[must_use]
pub fn adjust(colors: &[Color]) -> Vec<Color> {
    ColorblindAdjuster::new().adjust(colors)
}
