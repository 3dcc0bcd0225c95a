//! Perceptual color scales.
//!
//! An [`LchScale`] interpolates between control colors in LCH space. Hue takes
//! the shorter way around the wheel, and a gray stop borrows the hue of its
//! neighbour so that a ramp into gray fades chroma instead of sweeping hues.

use smallvec::SmallVec;

use crate::color::{Color, Lch};

/// Piecewise-linear interpolation through LCH control points.
#[derive(Debug, Clone, PartialEq)]
pub struct LchScale {
    stops: SmallVec<[Lch; 8]>,
}

impl LchScale {
    /// Build a scale through `colors`, in order.
    #[must_use]
    pub fn new<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        Self {
            stops: colors.into_iter().map(|c| c.to_lch()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Sample at `t` in `[0, 1]` (clamped; NaN reads as 0).
    ///
    /// Returns `None` for a scale without stops.
    #[must_use]
    pub fn sample(&self, t: f64) -> Option<Color> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        match n {
            0 => None,
            1 => Some(Color::from_lch(self.stops[0])),
            _ => {
                let scaled = t * (n - 1) as f64;
                #[expect(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "scaled is within 0..n-1"
                )]
                let idx = (scaled.floor() as usize).min(n - 2);
                let frac = scaled - idx as f64;
                Some(Color::from_lch(interpolate(
                    self.stops[idx],
                    self.stops[idx + 1],
                    frac,
                )))
            }
        }
    }

    /// `count` evenly spaced samples covering both ends of the scale.
    ///
    /// A single sample is taken from the middle.
    #[must_use]
    pub fn colors(&self, count: usize) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => self.sample(0.5).into_iter().collect(),
            _ => {
                let last = (count - 1) as f64;
                (0..count)
                    .filter_map(|i| self.sample(i as f64 / last))
                    .collect()
            }
        }
    }
}

fn interpolate(a: Lch, b: Lch, t: f64) -> Lch {
    let (ha, hb) = match (a.is_achromatic(), b.is_achromatic()) {
        (true, false) => (b.h, b.h),
        (false, true) => (a.h, a.h),
        _ => (a.h, b.h),
    };
    Lch {
        l: a.l + (b.l - a.l) * t,
        c: a.c + (b.c - a.c) * t,
        h: interpolate_hue(ha, hb, t),
    }
}

/// Shortest-arc hue interpolation, result in `[0, 360)`.
#[must_use]
pub fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    let delta = match h1 - h0 {
        d if d > 180.0 => d - 360.0,
        d if d < -180.0 => d + 360.0,
        d => d,
    };
    (h0 + t * delta).rem_euclid(360.0)
}
