//! Pure state logic for the cascading filters.
//!
//! This module contains the functional core: the selection record, the
//! transition function and invariant checks. All I/O happens elsewhere.

pub mod cascade;
pub mod transitions;
pub mod validation;

// Re-export commonly used types and functions
pub use cascade::{CascadeState, Generation, Selection, Slot};
pub use transitions::{FilterEvent, InvalidTransition, apply_options, load_categories, transition};
pub use validation::{InvariantViolation, check_invariants};
