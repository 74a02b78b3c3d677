//! Staleness-aware synchronization with the catalog services.
//!
//! Both procedures follow the same protocol: capture the state's generation
//! when a request is issued, and on arrival apply the response only if the
//! state still has that generation. Responses are ordered by the causal order
//! of the edits that caused them, not by the order they arrive in.

use std::fmt;

use crate::state::{CascadeState, Generation};

pub mod dispatcher;
pub mod synchronizer;

pub use dispatcher::{DispatchOutcome, SearchDispatcher};
pub use synchronizer::{OptionSynchronizer, SyncOutcome};

/// A response arrived after a newer edit. Not an error: the response is
/// dropped without touching the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superseded {
    /// The generation the request was issued at.
    pub issued: Generation,
    /// The state's generation when the response arrived.
    pub current: Generation,
}

impl fmt::Display for Superseded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "issued at {}, state now at {}",
            self.issued, self.current
        )
    }
}

/// Returns `Err(Superseded)` if `state` has moved past `issued`.
pub fn check_current(state: &CascadeState, issued: Generation) -> Result<(), Superseded> {
    let current = state.generation();
    if current == issued {
        Ok(())
    } else {
        Err(Superseded { issued, current })
    }
}
