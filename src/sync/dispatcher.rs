//! Turns a settled selection into a search request.

use tracing::{debug, warn};

use crate::catalog::{CatalogApiError, SearchQuery};
use crate::effects::{CatalogEffect, TaggedEffect};
use crate::state::{CascadeState, Generation};
use crate::types::ResultSet;

use super::{Superseded, check_current};

/// What happened when a search response came back.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The payload belongs to the current selection and should be shown.
    Rendered(ResultSet),

    /// A newer edit happened first; the payload was dropped.
    Superseded(Superseded),

    /// The fetch failed. The previously rendered results stay on screen.
    Failed(CatalogApiError),
}

/// Issues search requests and filters their responses by generation.
#[derive(Debug, Default)]
pub struct SearchDispatcher {
    rendered: Option<Generation>,
}

impl SearchDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The generation of the results currently on screen.
    pub fn rendered(&self) -> Option<Generation> {
        self.rendered
    }

    /// Builds the search for the full selection. All three parameters are
    /// always present; unconstrained slots are sent as `all`.
    pub fn issue(&self, state: &CascadeState) -> TaggedEffect {
        let generation = state.generation();
        let query = SearchQuery::new(
            state.category().value,
            state.manufacturer().value,
            state.color().value,
        );
        debug!(
            %generation,
            category = %query.category,
            manufacturer = %query.manufacturer,
            color = %query.color,
            "Dispatching search"
        );

        TaggedEffect::new(generation, CatalogEffect::Search(query))
    }

    /// Decides what to do with a search response.
    pub fn complete(
        &mut self,
        state: &CascadeState,
        issued: Generation,
        result: Result<ResultSet, CatalogApiError>,
    ) -> DispatchOutcome {
        if let Err(superseded) = check_current(state, issued) {
            debug!(%superseded, "Discarding superseded search results");
            return DispatchOutcome::Superseded(superseded);
        }

        match result {
            Ok(results) => {
                self.rendered = Some(issued);
                DispatchOutcome::Rendered(results)
            }
            Err(error) => {
                warn!(generation = %issued, error = %error, "Search failed");
                DispatchOutcome::Failed(error)
            }
        }
    }
}
