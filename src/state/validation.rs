//! Consistency checks for `CascadeState`.
//!
//! Pure functions that verify the relationships between the three selections
//! and their option sets. Transitions keep these true by construction; the
//! checks exist for debug assertions and tests.

use super::cascade::{CascadeState, Slot};

/// A broken relationship between selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Manufacturer enablement does not follow the category value.
    ManufacturerEnablement { enabled: bool },

    /// Color enablement does not follow the manufacturer.
    ColorEnablement { enabled: bool },

    /// A disabled slot holds a value other than `all`.
    DisabledSlotHasValue { slot: Slot, value: String },

    /// A selection is not in the option set loaded for its slot.
    StaleSelection { slot: Slot, value: String },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::ManufacturerEnablement { enabled } => write!(
                f,
                "manufacturer enabled={} does not match category selection",
                enabled
            ),
            InvariantViolation::ColorEnablement { enabled } => write!(
                f,
                "color enabled={} does not match manufacturer selection",
                enabled
            ),
            InvariantViolation::DisabledSlotHasValue { slot, value } => {
                write!(f, "disabled {} slot holds {}", slot, value)
            }
            InvariantViolation::StaleSelection { slot, value } => {
                write!(
                    f,
                    "{} selection {} is not in the loaded options",
                    slot, value
                )
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks invariants 1 to 4, returning the first violation found.
///
/// 1. Manufacturer is enabled exactly when a category is selected.
/// 2. Color is enabled exactly when manufacturer is enabled and selected.
/// 3. Disabled slots hold `all`.
/// 4. Manufacturer and color selections are members of their loaded sets.
pub fn check_invariants(state: &CascadeState) -> Result<(), InvariantViolation> {
    let category = state.category();
    let manufacturer = state.manufacturer();
    let color = state.color();

    if manufacturer.enabled != !category.value.is_all() {
        return Err(InvariantViolation::ManufacturerEnablement {
            enabled: manufacturer.enabled,
        });
    }

    if color.enabled != (manufacturer.enabled && !manufacturer.value.is_all()) {
        return Err(InvariantViolation::ColorEnablement {
            enabled: color.enabled,
        });
    }

    if !manufacturer.enabled && !manufacturer.value.is_all() {
        return Err(InvariantViolation::DisabledSlotHasValue {
            slot: Slot::Manufacturer,
            value: manufacturer.value.to_string(),
        });
    }
    if !color.enabled && !color.value.is_all() {
        return Err(InvariantViolation::DisabledSlotHasValue {
            slot: Slot::Color,
            value: color.value.to_string(),
        });
    }

    if !state.manufacturers().contains(&manufacturer.value) {
        return Err(InvariantViolation::StaleSelection {
            slot: Slot::Manufacturer,
            value: manufacturer.value.to_string(),
        });
    }
    if !state.colors().contains(&color.value) {
        return Err(InvariantViolation::StaleSelection {
            slot: Slot::Color,
            value: color.value.to_string(),
        });
    }

    Ok(())
}
