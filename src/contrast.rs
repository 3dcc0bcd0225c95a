//! WCAG contrast checks.

use std::fmt;

use crate::color::Color;

/// Conformance level reached by a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WcagLevel {
    Fail,
    /// 3:1, large text only.
    AaLarge,
    /// 4.5:1.
    Aa,
    /// 7:1.
    Aaa,
}

impl WcagLevel {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            Self::Aaa
        } else if ratio >= 4.5 {
            Self::Aa
        } else if ratio >= 3.0 {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        })
    }
}

/// Contrast between a foreground and background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    pub level: WcagLevel,
}

impl ContrastReport {
    #[must_use]
    pub fn new(foreground: Color, background: Color) -> Self {
        let ratio = foreground.contrast_ratio(background);
        Self {
            foreground,
            background,
            ratio,
            level: WcagLevel::from_ratio(ratio),
        }
    }

    /// True at AA or better for normal text.
    #[must_use]
    pub fn passes_normal_text(&self) -> bool {
        self.level >= WcagLevel::Aa
    }
}

impl fmt::Display for ContrastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}: {:.2}:1 ({})",
            self.foreground, self.background, self.ratio, self.level
        )
    }
}

/// Black or white, whichever contrasts more with `background`.
#[must_use]
pub fn readable_text_color(background: Color) -> Color {
    if background.contrast_ratio(Color::BLACK) >= background.contrast_ratio(Color::WHITE) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
