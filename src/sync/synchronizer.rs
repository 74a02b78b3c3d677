//! Keeps the manufacturer and color option sets in step with the selection.

use tracing::{debug, warn};

use crate::catalog::{CatalogApiError, OptionsQuery};
use crate::effects::{CatalogEffect, TaggedEffect};
use crate::state::{CascadeState, Generation, Slot, apply_options};
use crate::types::FilterOptions;

use super::{Superseded, check_current};

/// What happened when an option-listing response came back.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The fresh sets were applied. `reset` names the highest slot that had
    /// to fall back to `all` because its selection vanished from the new set.
    Loaded { reset: Option<Slot> },

    /// A newer edit happened first; nothing was applied.
    Superseded(Superseded),

    /// The fetch failed. The state and the previous sets are unchanged.
    Failed(CatalogApiError),
}

/// Issues option-listing requests and applies or discards their responses.
#[derive(Debug, Default)]
pub struct OptionSynchronizer {
    /// Generation of the most recent request whose response has not been
    /// applied or failed.
    pending: Option<Generation>,
}

impl OptionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The generation of the outstanding request, if the option sets may not
    /// yet reflect the current selection.
    pub fn pending(&self) -> Option<Generation> {
        self.pending
    }

    /// Builds the request for the state's current category and manufacturer,
    /// stamped with its generation.
    pub fn issue(&mut self, state: &CascadeState) -> TaggedEffect {
        let generation = state.generation();
        let query = OptionsQuery::new(state.category().value, state.manufacturer().value);
        debug!(
            %generation,
            category = %query.category,
            manufacturer = %query.manufacturer,
            "Issuing option sync"
        );

        self.pending = Some(generation);
        TaggedEffect::new(generation, CatalogEffect::ListOptions(query))
    }

    /// Applies a response to `state` if it is still current.
    pub fn complete(
        &mut self,
        state: &mut CascadeState,
        issued: Generation,
        result: Result<FilterOptions, CatalogApiError>,
    ) -> SyncOutcome {
        if let Err(superseded) = check_current(state, issued) {
            debug!(%superseded, "Discarding superseded option sync");
            return SyncOutcome::Superseded(superseded);
        }

        if self.pending == Some(issued) {
            self.pending = None;
        }

        match result {
            Ok(options) => {
                let next = apply_options(state, options);
                let reset = if next.manufacturer().value != state.manufacturer().value {
                    Some(Slot::Manufacturer)
                } else if next.color().value != state.color().value {
                    Some(Slot::Color)
                } else {
                    None
                };

                if let Some(slot) = reset {
                    debug!(%slot, generation = %issued, "Selection dropped by reload");
                }
                *state = next;
                SyncOutcome::Loaded { reset }
            }
            Err(error) => {
                warn!(generation = %issued, error = %error, "Option sync failed");
                SyncOutcome::Failed(error)
            }
        }
    }
}
