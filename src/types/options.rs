//! Option sets loaded for each filter slot.
//!
//! An `OptionSet` holds the fetched `(id, name)` pairs for one slot in the
//! order the service returned them. The implicit `all` entry is never stored;
//! it is always a member.

use super::ids::{ColorId, FilterValue, ManufacturerId};

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry<T> {
    pub id: T,
    pub name: String,
}

impl<T> OptionEntry<T> {
    pub fn new(id: T, name: impl Into<String>) -> Self {
        OptionEntry {
            id,
            name: name.into(),
        }
    }
}

/// Ordered options for one slot, as received from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet<T> {
    entries: Vec<OptionEntry<T>>,
}

impl<T> Default for OptionSet<T> {
    fn default() -> Self {
        OptionSet {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq> OptionSet<T> {
    pub fn new(entries: Vec<OptionEntry<T>>) -> Self {
        OptionSet { entries }
    }

    /// Returns true if `value` may be selected from this set.
    ///
    /// `All` is always a member.
    pub fn contains(&self, value: &FilterValue<T>) -> bool {
        match value {
            FilterValue::All => true,
            FilterValue::Only(id) => self.entries.iter().any(|e| &e.id == id),
        }
    }

    /// Looks up the display name for an identifier.
    pub fn name_of(&self, id: &T) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[OptionEntry<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry<T>> {
        self.entries.iter()
    }
}

impl<T: PartialEq> FromIterator<OptionEntry<T>> for OptionSet<T> {
    fn from_iter<I: IntoIterator<Item = OptionEntry<T>>>(iter: I) -> Self {
        OptionSet::new(iter.into_iter().collect())
    }
}

/// The manufacturer and color sets valid for a `(category, manufacturer)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub manufacturers: OptionSet<ManufacturerId>,
    pub colors: OptionSet<ColorId>,
}

impl FilterOptions {
    pub fn new(manufacturers: OptionSet<ManufacturerId>, colors: OptionSet<ColorId>) -> Self {
        FilterOptions {
            manufacturers,
            colors,
        }
    }
}
