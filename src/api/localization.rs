use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Translates user-facing strings (axis labels, titles, slider labels).
///
/// Implementations must be total: unknown keys come back unchanged.
pub trait Localizer {
    fn localize(&self, text: &str) -> String;
}

/// Identity localizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Localizer for PassThrough {
    fn localize(&self, text: &str) -> String {
        text.to_owned()
    }
}

/// Table-backed localizer falling back to the input on misses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogLocalizer {
    entries: IndexMap<String, String>,
}

impl CatalogLocalizer {
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, translation: impl Into<String>) {
        self.entries.insert(key.into(), translation.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for CatalogLocalizer {
    fn localize(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_owned())
    }
}
