//! The authoritative record of the three filter selections.

use std::fmt;

use crate::types::{CategoryId, ColorId, FilterValue, ManufacturerId, OptionSet};

/// One of the three filter slots, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Category,
    Manufacturer,
    Color,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Category => "category",
            Slot::Manufacturer => "manufacturer",
            Slot::Color => "color",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The causal version of a `CascadeState`.
///
/// Every state-changing user event advances it. Asynchronous work records the
/// generation it was issued at and is discarded on arrival if the state has
/// moved on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A filter slot's current value and whether the user may change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<T> {
    pub value: FilterValue<T>,
    pub enabled: bool,
}

impl<T> Selection<T> {
    pub fn enabled() -> Self {
        Selection {
            value: FilterValue::All,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Selection {
            value: FilterValue::All,
            enabled: false,
        }
    }
}

/// The triple of selections, the option sets they are drawn from, and the
/// generation counter.
///
/// Only the functions in [`super::transitions`] change a `CascadeState`; the
/// fields are read through accessors so that invariants 1 to 4 (see
/// [`super::validation`]) cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeState {
    pub(super) category: Selection<CategoryId>,
    pub(super) manufacturer: Selection<ManufacturerId>,
    pub(super) color: Selection<ColorId>,
    pub(super) generation: Generation,

    /// Static for the session. `None` until the host supplies or loads it.
    pub(super) categories: Option<OptionSet<CategoryId>>,
    pub(super) manufacturers: OptionSet<ManufacturerId>,
    pub(super) colors: OptionSet<ColorId>,
}

impl Default for CascadeState {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeState {
    /// Session-start state: everything `all`, only category enabled.
    pub fn new() -> Self {
        CascadeState {
            category: Selection::enabled(),
            manufacturer: Selection::disabled(),
            color: Selection::disabled(),
            generation: Generation::default(),
            categories: None,
            manufacturers: OptionSet::default(),
            colors: OptionSet::default(),
        }
    }

    /// Session-start state with a known category list.
    pub fn with_categories(categories: OptionSet<CategoryId>) -> Self {
        CascadeState {
            categories: Some(categories),
            ..Self::new()
        }
    }

    pub fn category(&self) -> &Selection<CategoryId> {
        &self.category
    }

    pub fn manufacturer(&self) -> &Selection<ManufacturerId> {
        &self.manufacturer
    }

    pub fn color(&self) -> &Selection<ColorId> {
        &self.color
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn categories(&self) -> Option<&OptionSet<CategoryId>> {
        self.categories.as_ref()
    }

    pub fn manufacturers(&self) -> &OptionSet<ManufacturerId> {
        &self.manufacturers
    }

    pub fn colors(&self) -> &OptionSet<ColorId> {
        &self.colors
    }

    /// Returns whether `slot` currently accepts user changes.
    pub fn is_enabled(&self, slot: Slot) -> bool {
        match slot {
            Slot::Category => self.category.enabled,
            Slot::Manufacturer => self.manufacturer.enabled,
            Slot::Color => self.color.enabled,
        }
    }

    /// Recomputes the enabled flags from the values above them and forces
    /// disabled slots back to `all`.
    pub(super) fn enforce_enablement(&mut self) {
        self.manufacturer.enabled = !self.category.value.is_all();
        if !self.manufacturer.enabled {
            self.manufacturer.value = FilterValue::All;
        }

        self.color.enabled = self.manufacturer.enabled && !self.manufacturer.value.is_all();
        if !self.color.enabled {
            self.color.value = FilterValue::All;
        }
    }
}

impl fmt::Display for CascadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] category={} manufacturer={}{} color={}{}",
            self.generation,
            self.category.value,
            self.manufacturer.value,
            if self.manufacturer.enabled { "" } else { " (disabled)" },
            self.color.value,
            if self.color.enabled { "" } else { " (disabled)" },
        )
    }
}
