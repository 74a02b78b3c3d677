//! Non-blocking notices shown to the user.

use std::fmt;

use crate::catalog::CatalogApiError;
use crate::effects::FetchKind;
use crate::state::Generation;

/// A fetch failed. The previous options or results remain displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: FetchKind,
    pub generation: Generation,
    pub message: String,
    pub retriable: bool,
}

impl Notice {
    pub fn fetch_failed(kind: FetchKind, generation: Generation, error: &CatalogApiError) -> Self {
        Notice {
            kind,
            generation,
            message: error.to_string(),
            retriable: error.kind.is_retriable(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not load {} ({}): {}",
            self.kind, self.generation, self.message
        )
    }
}
