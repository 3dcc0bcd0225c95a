//! Palette categorization.
//!
//! A palette is labelled by the first rule that matches:
//!
//! 1. its name contains a keyword of one of the profile's keyword categories
//!    (Flags, then Brands, then USAF and Pastels in the extended profile);
//! 2. it has no colors;
//! 3. its mean saturation or lightness is extreme;
//! 4. none of its colors has a hue;
//! 5. its hues are spread wide enough to count as multicolor;
//! 6. otherwise the mean hue picks a fixed hue bucket.
//!
//! Categorization is total; every input gets a [`Category`].
//!
//! ```
//! use hueforge::categorize::{categorize, Category};
//!
//! assert_eq!(categorize(&["#FF0000", "#00FF00", "#0000FF"], "RGB Primary"), Category::Multicolor);
//! assert_eq!(categorize(&["#FFCC80", "#FFA726", "#FB8C00"], "Sunset"), Category::Orange);
//! assert_eq!(categorize::<&str>(&[], "Empty"), Category::Monochrome);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use smallvec::SmallVec;

use crate::color::Color;
use crate::palette::SavedPalette;

/// The closed set of palette labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Monochrome,
    Multicolor,
    Brands,
    Flags,
    Usaf,
    Pastels,
}

impl Category {
    pub const ALL: [Self; 13] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Purple,
        Self::Monochrome,
        Self::Multicolor,
        Self::Brands,
        Self::Flags,
        Self::Usaf,
        Self::Pastels,
    ];

    /// Display label, e.g. `"USAF"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Monochrome => "Monochrome",
            Self::Multicolor => "Multicolor",
            Self::Brands => "Brands",
            Self::Flags => "Flags",
            Self::Usaf => "USAF",
            Self::Pastels => "Pastels",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown palette category: {:?}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

// ============================================================================
// Keyword table
// ============================================================================

static DEFAULT_KEYWORDS: LazyLock<HashMap<Category, Vec<String>>> = LazyLock::new(|| {
    let mut keywords: HashMap<Category, Vec<String>> = HashMap::new();

    for (line_no, line) in include_str!("default_keywords.tsv").lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (category, keyword) = line
            .split_once('\t')
            .expect("src/default_keywords.tsv: expected TAB-separated category + keyword");

        let category: Category = category
            .parse()
            .expect("src/default_keywords.tsv: unknown category");

        let entry = keywords.entry(category).or_default();
        let keyword = keyword.trim().to_lowercase();
        assert!(
            !entry.contains(&keyword),
            "src/default_keywords.tsv:{}: duplicate keyword {keyword:?}",
            line_no + 1
        );
        entry.push(keyword);
    }

    keywords
});

/// Lower-cased name keywords per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    keywords: HashMap<Category, Vec<String>>,
}

impl KeywordTable {
    /// Create a table from keyword lists.
    ///
    /// With `inherit`, the built-in lists are loaded first and each supplied
    /// category replaces the built-in list for that category.
    #[must_use]
    pub fn new(keywords: Option<HashMap<Category, Vec<String>>>, inherit: bool) -> Self {
        let mut merged = if inherit {
            DEFAULT_KEYWORDS.clone()
        } else {
            HashMap::new()
        };

        if let Some(keywords) = keywords {
            merged.extend(keywords.into_iter().map(|(category, words)| {
                (
                    category,
                    words.into_iter().map(|w| w.trim().to_lowercase()).collect(),
                )
            }));
        }

        Self { keywords: merged }
    }

    /// Keywords for `category` (empty if none are configured).
    #[must_use]
    pub fn get(&self, category: Category) -> &[String] {
        self.keywords.get(&category).map_or(&[], Vec::as_slice)
    }

    /// First keyword of `category` found in `name` (case-insensitive).
    #[must_use]
    pub fn find_match(&self, category: Category, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.get(category)
            .iter()
            .find(|keyword| !keyword.is_empty() && name.contains(keyword.as_str()))
            .map(String::as_str)
    }

    /// Render as an INI document readable by [`KeywordTable::from_ini_str`].
    #[must_use]
    pub fn config(&self) -> String {
        let mut categories: Vec<&Category> = self.keywords.keys().collect();
        categories.sort_unstable();

        let mut out = String::from("[keywords]\n");
        for category in categories {
            out.push_str(&category.label().to_lowercase());
            out.push_str(" = ");
            out.push_str(&self.get(*category).join(", "));
            out.push('\n');
        }
        out
    }

    /// Parse an INI document with a `[keywords]` section.
    ///
    /// Each line is `category = keyword, keyword, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError`] for malformed lines, unknown categories,
    /// repeated categories or a missing `[keywords]` section.
    pub fn from_ini_str(contents: &str, inherit: bool) -> Result<Self, KeywordError> {
        let mut in_keywords = false;
        let mut seen_section = false;
        let mut keywords: HashMap<Category, Vec<String>> = HashMap::new();

        for (line_no, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_keywords = line[1..line.len() - 1].trim().eq_ignore_ascii_case("keywords");
                seen_section |= in_keywords;
                continue;
            }

            if !in_keywords {
                continue;
            }

            let (name, list) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(|| KeywordError::InvalidIniLine {
                    line_no: line_no + 1,
                    line: raw_line.to_string(),
                })?;

            let name = name.trim();
            let category: Category = name.parse().map_err(|_| KeywordError::UnknownCategory {
                line_no: line_no + 1,
                name: name.to_string(),
            })?;

            let words: Vec<String> = list
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();

            if keywords.insert(category, words).is_some() {
                return Err(KeywordError::DuplicateIniKey {
                    line_no: line_no + 1,
                    name: name.to_string(),
                });
            }
        }

        if !seen_section {
            return Err(KeywordError::MissingKeywordsSection);
        }

        Ok(Self::new(Some(keywords), inherit))
    }

    /// Read an INI keyword file from disk.
    ///
    /// # Errors
    ///
    /// See [`KeywordTable::from_ini_str`]; I/O failures become [`KeywordError::Io`].
    pub fn read(path: impl AsRef<Path>, inherit: bool) -> Result<Self, KeywordError> {
        let contents = fs::read_to_string(&path).map_err(|err| KeywordError::Io {
            path: path.as_ref().to_path_buf(),
            err,
        })?;
        Self::from_ini_str(&contents, inherit)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(None, true)
    }
}

/// Errors from loading keyword configuration.
#[derive(Debug)]
pub enum KeywordError {
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    MissingKeywordsSection,
    InvalidIniLine {
        line_no: usize,
        line: String,
    },
    DuplicateIniKey {
        line_no: usize,
        name: String,
    },
    UnknownCategory {
        line_no: usize,
        name: String,
    },
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, err } => {
                write!(f, "failed to read keyword file {}: {err}", path.display())
            }
            Self::MissingKeywordsSection => write!(f, "keyword ini is missing a [keywords] section"),
            Self::InvalidIniLine { line_no, line } => {
                write!(f, "invalid keyword ini line {line_no}: {line:?}")
            }
            Self::DuplicateIniKey { line_no, name } => {
                write!(f, "duplicate keyword category {name:?} at line {line_no}")
            }
            Self::UnknownCategory { line_no, name } => {
                write!(f, "unknown keyword category {name:?} at line {line_no}")
            }
        }
    }
}

impl std::error::Error for KeywordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

/// How hue statistics treat the 0°/360° seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HueMode {
    /// Raw hue values: 350° and 10° are 340° apart.
    #[default]
    Linear,
    /// Angular statistics: 350° and 10° are 20° apart.
    Circular,
}

/// Thresholds and keyword order for a [`Categorizer`].
///
/// Saturation and lightness thresholds are HSL percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizerProfile {
    pub keyword_categories: Vec<Category>,
    pub orange_cutoff: f64,
    pub min_saturation: f64,
    pub min_lightness: f64,
    pub max_lightness: f64,
    pub multicolor_range: f64,
    pub multicolor_std_dev: f64,
    pub hue_mode: HueMode,
}

impl CategorizerProfile {
    /// Flags and Brands keywords, Orange below 45°.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            keyword_categories: vec![Category::Flags, Category::Brands],
            orange_cutoff: 45.0,
            min_saturation: 10.0,
            min_lightness: 10.0,
            max_lightness: 95.0,
            multicolor_range: 180.0,
            multicolor_std_dev: 60.0,
            hue_mode: HueMode::Linear,
        }
    }

    /// Adds USAF and Pastels keywords, Orange below 50°.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            keyword_categories: vec![
                Category::Flags,
                Category::Brands,
                Category::Usaf,
                Category::Pastels,
            ],
            orange_cutoff: 50.0,
            ..Self::standard()
        }
    }

    #[must_use]
    pub fn hue_mode(mut self, mode: HueMode) -> Self {
        self.hue_mode = mode;
        self
    }
}

impl Default for CategorizerProfile {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Categorizer
// ============================================================================

/// Hue bucket for a mean hue in degrees.
#[must_use]
pub fn hue_bucket(hue: f64, orange_cutoff: f64) -> Category {
    let hue = hue.rem_euclid(360.0);
    if !(20.0..330.0).contains(&hue) {
        Category::Red
    } else if hue < orange_cutoff {
        Category::Orange
    } else if hue < 70.0 {
        Category::Yellow
    } else if hue < 160.0 {
        Category::Green
    } else if hue < 200.0 {
        Category::Cyan
    } else if hue < 260.0 {
        Category::Blue
    } else {
        Category::Purple
    }
}

/// Summary statistics of a list of hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueStats {
    pub mean: f64,
    pub range: f64,
    pub std_dev: f64,
}

impl HueStats {
    /// `None` for an empty list.
    #[must_use]
    pub fn compute(hues: &[f64], mode: HueMode) -> Option<Self> {
        if hues.is_empty() {
            return None;
        }
        Some(match mode {
            HueMode::Linear => linear_stats(hues),
            HueMode::Circular => circular_stats(hues),
        })
    }
}

fn linear_stats(hues: &[f64]) -> HueStats {
    let n = hues.len() as f64;
    let mean = hues.iter().sum::<f64>() / n;
    let max = hues.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = hues.iter().copied().fold(f64::INFINITY, f64::min);
    let variance = hues.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n;
    HueStats {
        mean,
        range: max - min,
        std_dev: variance.sqrt(),
    }
}

fn circular_stats(hues: &[f64]) -> HueStats {
    let n = hues.len() as f64;
    let (sin, cos) = hues.iter().fold((0.0, 0.0), |(s, c), h| {
        let r = h.to_radians();
        (s + r.sin(), c + r.cos())
    });
    let (sin, cos) = (sin / n, cos / n);
    let resultant = sin.hypot(cos).min(1.0);
    let mean = sin.atan2(cos).to_degrees().rem_euclid(360.0);
    let std_dev = (-2.0 * resultant.ln()).sqrt().to_degrees();

    // Smallest arc covering every hue: the circle minus its largest gap.
    let mut sorted: SmallVec<[f64; 16]> = hues.iter().map(|h| h.rem_euclid(360.0)).collect();
    sorted.sort_by(f64::total_cmp);
    let wrap_gap = sorted[0] + 360.0 - sorted[sorted.len() - 1];
    let largest_gap = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(wrap_gap, f64::max);

    HueStats {
        mean,
        range: 360.0 - largest_gap,
        std_dev,
    }
}

/// Labels palettes using a profile and keyword table.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    profile: CategorizerProfile,
    keywords: KeywordTable,
}

impl Categorizer {
    #[must_use]
    pub fn new(profile: CategorizerProfile, keywords: KeywordTable) -> Self {
        Self { profile, keywords }
    }

    #[must_use]
    pub fn profile(&self) -> &CategorizerProfile {
        &self.profile
    }

    #[must_use]
    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Categorize a palette by its color strings and name.
    ///
    /// Unparseable color strings are skipped.
    #[must_use]
    pub fn categorize<S: AsRef<str>>(&self, colors: &[S], name: &str) -> Category {
        for &category in &self.profile.keyword_categories {
            if let Some(keyword) = self.keywords.find_match(category, name) {
                log::trace!(target: "hueforge::categorize", "{name:?} matched {category} keyword {keyword:?}");
                return category;
            }
        }

        if colors.is_empty() {
            return Category::Monochrome;
        }

        let parsed: SmallVec<[Color; 16]> = colors
            .iter()
            .filter_map(|c| match Color::parse(c.as_ref()) {
                Ok(color) => Some(color),
                Err(err) => {
                    log::debug!(target: "hueforge::categorize", "{name:?}: skipping color: {err}");
                    None
                }
            })
            .collect();

        self.categorize_colors(&parsed)
    }

    /// Statistical steps only; no name keywords are consulted.
    #[must_use]
    pub fn categorize_colors(&self, colors: &[Color]) -> Category {
        let profile = &self.profile;
        if colors.is_empty() {
            return Category::Monochrome;
        }

        let n = colors.len() as f64;
        let (saturation, lightness) = colors.iter().fold((0.0, 0.0), |(s, l), color| {
            let hsl = color.to_hsl();
            (s + hsl.saturation, l + hsl.lightness)
        });
        let (saturation, lightness) = (saturation / n, lightness / n);
        if saturation < profile.min_saturation
            || lightness < profile.min_lightness
            || lightness > profile.max_lightness
        {
            return Category::Monochrome;
        }

        let hues: SmallVec<[f64; 16]> = colors.iter().filter_map(Color::hue).collect();
        let Some(stats) = HueStats::compute(&hues, profile.hue_mode) else {
            return Category::Monochrome;
        };

        if stats.range > profile.multicolor_range && stats.std_dev > profile.multicolor_std_dev {
            return Category::Multicolor;
        }

        hue_bucket(stats.mean, profile.orange_cutoff)
    }

    /// Categorize every saved palette.
    #[must_use]
    pub fn categorize_corpus(&self, palettes: &[SavedPalette]) -> Vec<CategorizedPalette> {
        palettes
            .iter()
            .map(|palette| {
                let category = self.categorize(&palette.colors, &palette.name);
                log::debug!(target: "hueforge::categorize", "{:?} -> {category}", palette.name);
                CategorizedPalette {
                    name: palette.name.clone(),
                    colors: palette.colors.clone(),
                    category,
                }
            })
            .collect()
    }
}

/// A saved palette with its assigned category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedPalette {
    pub name: String,
    pub colors: Vec<String>,
    pub category: Category,
}

static STANDARD: LazyLock<Categorizer> = LazyLock::new(Categorizer::default);

/// Categorize with the standard profile and built-in keywords.
#[must_use]
pub fn categorize<S: AsRef<str>>(colors: &[S], name: &str) -> Category {
    STANDARD.categorize(colors, name)
}

/// Categorize a corpus with the standard profile and built-in keywords.
#[must_use]
pub fn categorize_corpus(palettes: &[SavedPalette]) -> Vec<CategorizedPalette> {
    STANDARD.categorize_corpus(palettes)
}
