//! Palette model: an ordered list of colors, some of them locked.
//!
//! Locked colors survive regeneration in place and feed the generator as
//! seeds. Every color carries a process-unique id so callers can refer to a
//! slot while the palette changes around it.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;
use crate::generator::{
    ColorSource, GenerationRequest, GenerationType, InvalidColorError, PaletteGenerator,
};
use crate::simulate::Simulator;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// One slot of a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub id: u64,
    pub color: Color,
    pub locked: bool,
}

impl PaletteColor {
    /// An unlocked color with a fresh id.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            id: next_id(),
            color,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    #[must_use]
    pub fn new<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        Self {
            colors: colors.into_iter().map(PaletteColor::new).collect(),
        }
    }

    /// A fresh palette of `count` colors from an OS-seeded generator.
    #[must_use]
    pub fn random(count: usize, kind: GenerationType) -> Self {
        Self::random_with(&mut PaletteGenerator::new(), count, kind)
    }

    /// A fresh palette of `count` colors from `generator`.
    #[must_use]
    pub fn random_with<S: ColorSource, M: Simulator>(
        generator: &mut PaletteGenerator<S, M>,
        count: usize,
        kind: GenerationType,
    ) -> Self {
        // Nothing is locked, so generation cannot reject the request.
        let colors = generator
            .generate(&GenerationRequest::new(count, kind))
            .unwrap_or_default();
        Self::new(colors)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// The colors in order, without ids.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        self.colors.iter().map(|slot| slot.color).collect()
    }

    /// Colors currently locked, in palette order.
    #[must_use]
    pub fn locked_colors(&self) -> Vec<Color> {
        self.colors
            .iter()
            .filter(|slot| slot.locked)
            .map(|slot| slot.color)
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&PaletteColor> {
        self.colors.iter().find(|slot| slot.id == id)
    }

    /// Append a color and return its id.
    pub fn push(&mut self, color: Color) -> u64 {
        let slot = PaletteColor::new(color);
        self.colors.push(slot);
        slot.id
    }

    pub fn remove(&mut self, id: u64) -> Option<PaletteColor> {
        let index = self.colors.iter().position(|slot| slot.id == id)?;
        Some(self.colors.remove(index))
    }

    fn set_locked(&mut self, id: u64, locked: bool) -> bool {
        match self.colors.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => {
                slot.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Lock a slot. Returns false for an unknown id.
    pub fn lock(&mut self, id: u64) -> bool {
        self.set_locked(id, true)
    }

    /// Unlock a slot. Returns false for an unknown id.
    pub fn unlock(&mut self, id: u64) -> bool {
        self.set_locked(id, false)
    }

    /// Flip a slot's lock; returns the new state.
    pub fn toggle_lock(&mut self, id: u64) -> Option<bool> {
        let slot = self.colors.iter_mut().find(|slot| slot.id == id)?;
        slot.locked = !slot.locked;
        Some(slot.locked)
    }

    /// Replace every unlocked color.
    ///
    /// Locked colors are passed to the generator as locked inputs and keep
    /// their slot and id. Each unlocked slot `i` receives generated color `i`
    /// under a fresh id.
    ///
    /// # Errors
    ///
    /// Propagates [`InvalidColorError`] from the generator.
    pub fn regenerate<S: ColorSource, M: Simulator>(
        &mut self,
        generator: &mut PaletteGenerator<S, M>,
        kind: GenerationType,
        colorblind_safe: bool,
    ) -> Result<(), InvalidColorError> {
        let request = GenerationRequest {
            num_colors: self.colors.len(),
            kind,
            locked_colors: self.locked_colors().iter().map(Color::hex).collect(),
            colorblind_safe,
        };
        let generated = generator.generate(&request)?;

        for (slot, &color) in self.colors.iter_mut().zip(&generated) {
            if !slot.locked {
                *slot = PaletteColor::new(color);
            }
        }
        log::debug!(
            target: "hueforge::palette",
            "regenerated {} unlocked slot(s) as {kind}",
            self.colors.iter().filter(|slot| !slot.locked).count()
        );
        Ok(())
    }

    /// CSS custom properties, one per color: `--{prefix}-1: #rrggbb;`.
    #[must_use]
    pub fn to_css_variables(&self, prefix: &str) -> String {
        let mut out = String::from(":root {\n");
        for (i, slot) in self.colors.iter().enumerate() {
            let _ = writeln!(out, "  --{prefix}-{}: {};", i + 1, slot.color);
        }
        out.push_str("}\n");
        out
    }

    /// Snapshot as a saved record.
    #[must_use]
    pub fn to_saved(&self, id: impl Into<String>, name: impl Into<String>) -> SavedPalette {
        SavedPalette {
            id: id.into(),
            name: name.into(),
            colors: self.colors.iter().map(|slot| slot.color.hex()).collect(),
        }
    }
}

/// A persisted palette record: `{ id, name, colors }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedPalette {
    /// String or number in JSON; missing ids load as empty.
    #[cfg_attr(feature = "json", serde(default, deserialize_with = "json::string_or_number"))]
    pub id: String,
    pub name: String,
    /// Color strings as stored; not validated. Non-string JSON entries are
    /// dropped on load.
    #[cfg_attr(feature = "json", serde(default, deserialize_with = "json::string_entries"))]
    pub colors: Vec<String>,
}

impl SavedPalette {
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    /// Rebuild a [`Palette`], skipping colors that do not parse.
    #[must_use]
    pub fn to_palette(&self) -> Palette {
        Palette::new(self.colors.iter().filter_map(|c| Color::parse(c).ok()))
    }
}

#[cfg(feature = "json")]
mod json {
    use std::fmt;

    use serde::de::{Deserialize, Deserializer, Error as _};
    use serde_json::Value;

    use super::SavedPalette;

    /// Saved-palette JSON that cannot be read at all.
    #[derive(Debug)]
    pub enum CorpusError {
        Json(serde_json::Error),
        NotAnArray,
    }

    impl fmt::Display for CorpusError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Json(err) => write!(f, "invalid palette JSON: {err}"),
                Self::NotAnArray => write!(f, "palette JSON must be an array of records"),
            }
        }
    }

    impl std::error::Error for CorpusError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                Self::Json(err) => Some(err),
                Self::NotAnArray => None,
            }
        }
    }

    impl From<serde_json::Error> for CorpusError {
        fn from(err: serde_json::Error) -> Self {
            Self::Json(err)
        }
    }

    pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(D::Error::custom(format!(
                "expected a string or number id, found {other}"
            ))),
        }
    }

    pub(super) fn string_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect())
    }

    impl SavedPalette {
        /// Parse a JSON array of `{ "id", "name", "colors" }` records.
        ///
        /// Records that do not decode are skipped with a warning, so one bad
        /// entry never hides the rest of the corpus.
        ///
        /// # Errors
        ///
        /// Returns [`CorpusError`] when the input is not JSON or not an array.
        pub fn parse_json_array(input: &str) -> Result<Vec<Self>, CorpusError> {
            let value: Value = serde_json::from_str(input)?;
            let Value::Array(items) = value else {
                return Err(CorpusError::NotAnArray);
            };
            Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<Self>(item) {
                    Ok(palette) => Some(palette),
                    Err(err) => {
                        log::warn!(
                            target: "hueforge::palette",
                            "skipping palette record #{index}: {err}"
                        );
                        None
                    }
                })
                .collect())
        }

        /// Serialize as a JSON record.
        ///
        /// # Errors
        ///
        /// Propagates serializer failures.
        pub fn to_json(&self) -> Result<String, CorpusError> {
            Ok(serde_json::to_string(self)?)
        }
    }
}

#[cfg(feature = "json")]
pub use json::CorpusError;
