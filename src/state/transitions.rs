//! Transitions for the cascading filter state machine.
//!
//! Pure functions computing the next `CascadeState` from the current one and
//! an event. Nothing here performs I/O, and nothing here panics: an event that
//! is not allowed in the current state is returned as [`InvalidTransition`],
//! which callers treat as a no-op.

use thiserror::Error;

use crate::types::{CategoryId, ColorId, FilterOptions, FilterValue, ManufacturerId, OptionSet};

use super::cascade::{CascadeState, Slot};

/// Events that drive the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The user picked a category (or `all`).
    CategoryChanged(FilterValue<CategoryId>),

    /// The user picked a manufacturer (or `all`).
    ManufacturerChanged(FilterValue<ManufacturerId>),

    /// The user picked a color (or `all`).
    ColorChanged(FilterValue<ColorId>),

    /// Fresh manufacturer and color sets arrived for the current generation.
    OptionsLoaded(FilterOptions),
}

impl FilterEvent {
    /// The slot a user event targets. `None` for `OptionsLoaded`.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            FilterEvent::CategoryChanged(_) => Some(Slot::Category),
            FilterEvent::ManufacturerChanged(_) => Some(Slot::Manufacturer),
            FilterEvent::ColorChanged(_) => Some(Slot::Color),
            FilterEvent::OptionsLoaded(_) => None,
        }
    }
}

/// Rejection returned when an event is not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTransition {
    /// The user tried to change a slot that is disabled.
    #[error("{slot} filter is disabled")]
    SlotDisabled { slot: Slot },

    /// The value is not in the option set currently loaded for the slot.
    #[error("{value} is not an available {slot} option")]
    UnknownOption { slot: Slot, value: String },
}

/// Computes the state that results from applying `event` to `state`.
///
/// - `CategoryChanged` sets the category, resets manufacturer and color to
///   `all`, and advances the generation.
/// - `ManufacturerChanged` sets the manufacturer, resets color to `all`, and
///   advances the generation.
/// - `ColorChanged` sets the color and advances the generation.
/// - `OptionsLoaded` replaces the option sets and drops any selection that is
///   no longer offered. It never advances the generation.
///
/// Returns the new state, or the reason the event was rejected.
pub fn transition(
    state: &CascadeState,
    event: FilterEvent,
) -> Result<CascadeState, InvalidTransition> {
    let next = match event {
        FilterEvent::CategoryChanged(value) => {
            if let Some(categories) = &state.categories
                && !categories.contains(&value)
            {
                return Err(InvalidTransition::UnknownOption {
                    slot: Slot::Category,
                    value: value.to_string(),
                });
            }

            let mut next = state.clone();
            next.category.value = value;
            next.manufacturer.value = FilterValue::All;
            next.color.value = FilterValue::All;
            next.enforce_enablement();
            next.generation = state.generation.next();
            next
        }

        FilterEvent::ManufacturerChanged(value) => {
            if !state.manufacturer.enabled {
                return Err(InvalidTransition::SlotDisabled {
                    slot: Slot::Manufacturer,
                });
            }
            if !state.manufacturers.contains(&value) {
                return Err(InvalidTransition::UnknownOption {
                    slot: Slot::Manufacturer,
                    value: value.to_string(),
                });
            }

            let mut next = state.clone();
            next.manufacturer.value = value;
            next.color.value = FilterValue::All;
            next.enforce_enablement();
            next.generation = state.generation.next();
            next
        }

        FilterEvent::ColorChanged(value) => {
            if !state.color.enabled {
                return Err(InvalidTransition::SlotDisabled { slot: Slot::Color });
            }
            if !state.colors.contains(&value) {
                return Err(InvalidTransition::UnknownOption {
                    slot: Slot::Color,
                    value: value.to_string(),
                });
            }

            let mut next = state.clone();
            next.color.value = value;
            next.generation = state.generation.next();
            next
        }

        FilterEvent::OptionsLoaded(options) => apply_options(state, options),
    };

    debug_assert!(
        super::validation::check_invariants(&next).is_ok(),
        "transition broke an invariant: {next}"
    );
    Ok(next)
}

/// Replaces the manufacturer and color option sets.
///
/// A manufacturer selection missing from the new set is reset to `all`, which
/// cascades to color. Otherwise a color selection missing from the new color
/// set is reset on its own. The generation is left untouched, so re-applying
/// the same sets is a no-op.
pub fn apply_options(state: &CascadeState, options: FilterOptions) -> CascadeState {
    let mut next = state.clone();
    let FilterOptions {
        manufacturers,
        colors,
    } = options;

    // The color set was fetched for the dropped manufacturer, so it no longer
    // describes the selection.
    let colors = if !manufacturers.contains(&next.manufacturer.value) {
        next.manufacturer.value = FilterValue::All;
        next.color.value = FilterValue::All;
        OptionSet::default()
    } else {
        if !colors.contains(&next.color.value) {
            next.color.value = FilterValue::All;
        }
        colors
    };

    next.manufacturers = manufacturers;
    next.colors = colors;
    next.enforce_enablement();
    next
}

/// Installs the session's category list.
///
/// The current category value is kept; the list only gates later
/// `CategoryChanged` events.
pub fn load_categories(state: &CascadeState, categories: OptionSet<CategoryId>) -> CascadeState {
    let mut next = state.clone();
    next.categories = Some(categories);
    next
}
