//! Harmony detection.
//!
//! Classifies an existing palette by grouping the hues of its chromatic
//! colors and comparing group centres against the classic harmony angles.
//! This is a loose heuristic with its own tolerances, separate from the
//! categorizer's statistics.

use std::fmt;

use smallvec::SmallVec;

use crate::color::Color;

/// Hues closer than this (circularly) fall into the same group.
pub const GROUP_TOLERANCE: f64 = 30.0;
/// Allowed deviation from 180° or 120° between group centres.
pub const ANGLE_TOLERANCE: f64 = 20.0;
/// Widest hue span still considered monochromatic.
pub const MONOCHROMATIC_SPAN: f64 = 30.0;
/// Widest hue span still considered analogous.
pub const ANALOGOUS_SPAN: f64 = 60.0;

/// Harmony detected in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmony {
    Monochromatic,
    Analogous,
    Complementary,
    Triadic,
    /// No recognised relationship, or an empty palette.
    Unclassified,
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Unclassified => "unclassified",
        })
    }
}

/// A cluster of nearby hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueGroup {
    /// Circular mean of the member hues, in `[0, 360)`.
    pub center: f64,
    pub members: usize,
}

/// Circular distance between two hues, in `[0, 180]`.
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn circular_mean(hues: &[f64]) -> f64 {
    let (sin, cos) = hues.iter().fold((0.0_f64, 0.0_f64), |(s, c), h| {
        let r = h.to_radians();
        (s + r.sin(), c + r.cos())
    });
    sin.atan2(cos).to_degrees().rem_euclid(360.0)
}

/// Group hues whose neighbours are within `tolerance` degrees.
///
/// Groups chain: each hue joins the group of its nearest lower neighbour
/// when close enough, and the last group wraps into the first across 0°.
#[must_use]
pub fn group_hues(hues: &[f64], tolerance: f64) -> Vec<HueGroup> {
    let mut sorted: SmallVec<[f64; 16]> = hues.iter().map(|h| h.rem_euclid(360.0)).collect();
    sorted.sort_by(f64::total_cmp);

    let mut clusters: Vec<SmallVec<[f64; 8]>> = Vec::new();
    for hue in sorted {
        match clusters.last_mut() {
            Some(cluster) if cluster.last().is_some_and(|&prev| hue - prev <= tolerance) => {
                cluster.push(hue);
            }
            _ => clusters.push(SmallVec::from_slice(&[hue])),
        }
    }

    if clusters.len() > 1 {
        let first = clusters[0][0];
        let last = clusters[clusters.len() - 1][clusters[clusters.len() - 1].len() - 1];
        if first + 360.0 - last <= tolerance {
            let tail = clusters.pop().unwrap_or_default();
            clusters[0].extend(tail);
        }
    }

    clusters
        .iter()
        .map(|members| HueGroup {
            center: circular_mean(members),
            members: members.len(),
        })
        .collect()
}

/// Smallest arc containing every hue.
fn hue_span(hues: &[f64]) -> f64 {
    let mut sorted: SmallVec<[f64; 16]> = hues.iter().map(|h| h.rem_euclid(360.0)).collect();
    sorted.sort_by(f64::total_cmp);
    match (sorted.first(), sorted.last()) {
        (Some(&first), Some(&last)) => {
            let largest_gap = sorted
                .windows(2)
                .map(|w| w[1] - w[0])
                .fold(first + 360.0 - last, f64::max);
            (360.0 - largest_gap).max(0.0)
        }
        _ => 0.0,
    }
}

/// Classify the relationship between the colors of a palette.
///
/// Achromatic colors carry no hue and are ignored; a palette of only grays
/// is monochromatic.
#[must_use]
pub fn detect_harmony(colors: &[Color]) -> Harmony {
    if colors.is_empty() {
        return Harmony::Unclassified;
    }

    let hues: SmallVec<[f64; 16]> = colors.iter().filter_map(Color::hue).collect();
    let span = hue_span(&hues);
    if span <= MONOCHROMATIC_SPAN {
        return Harmony::Monochromatic;
    }
    if span <= ANALOGOUS_SPAN {
        return Harmony::Analogous;
    }

    let groups = group_hues(&hues, GROUP_TOLERANCE);
    let near = |a: f64, b: f64, angle: f64| (hue_distance(a, b) - angle).abs() <= ANGLE_TOLERANCE;

    match groups.as_slice() {
        [a, b] if near(a.center, b.center, 180.0) => Harmony::Complementary,
        [a, b, c]
            if near(a.center, b.center, 120.0)
                && near(b.center, c.center, 120.0)
                && near(a.center, c.center, 120.0) =>
        {
            Harmony::Triadic
        }
        _ => Harmony::Unclassified,
    }
}

/// Returns true if the palette's hues form three groups about 120° apart.
#[must_use]
pub fn is_triadic(colors: &[Color]) -> bool {
    detect_harmony(colors) == Harmony::Triadic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony;

    #[test]
    fn test_triadic_harmony_is_detected() {
        let colors = harmony::triadic(Color::from_rgb(220, 80, 40));
        assert!(is_triadic(&colors));
    }

    #[test]
    fn test_complementary_is_detected() {
        let colors = harmony::complementary(Color::from_rgb(30, 90, 200));
        assert_eq!(detect_harmony(&colors), Harmony::Complementary);
    }

    #[test]
    fn test_complementary_with_tints_still_two_groups() {
        let seed = Color::from_rgb(200, 40, 40);
        let mut colors = harmony::complementary(seed);
        colors.push(seed.mix(Color::WHITE, 0.3));
        assert_eq!(detect_harmony(&colors), Harmony::Complementary);
    }

    #[test]
    fn test_analogous_and_monochromatic() {
        let seed = Color::from_rgb(40, 160, 90);
        assert_eq!(detect_harmony(&harmony::tints(seed, 4)), Harmony::Monochromatic);
        let pair = [seed, seed.rotate_hue(45.0)];
        assert_eq!(detect_harmony(&pair), Harmony::Analogous);
    }

    #[test]
    fn test_grays_and_empty() {
        assert_eq!(detect_harmony(&[Color::BLACK, Color::WHITE]), Harmony::Monochromatic);
        assert_eq!(detect_harmony(&[]), Harmony::Unclassified);
    }

    #[test]
    fn test_square_is_unclassified() {
        let colors = harmony::square(Color::from_rgb(255, 0, 0));
        assert_eq!(detect_harmony(&colors), Harmony::Unclassified);
    }

    #[test]
    fn test_groups_wrap_across_zero() {
        let groups = group_hues(&[350.0, 5.0, 180.0], GROUP_TOLERANCE);
        assert_eq!(groups.len(), 2);
        let wrapped = groups.iter().find(|g| g.members == 2).unwrap();
        assert!(hue_distance(wrapped.center, 357.5) < 1e-6, "{wrapped:?}");
    }

    #[test]
    fn test_hue_distance() {
        assert!((hue_distance(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((hue_distance(0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((hue_distance(90.0, -90.0) - 180.0).abs() < 1e-9);
    }
}
