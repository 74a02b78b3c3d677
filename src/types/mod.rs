//! Core domain types for the catalog filter engine.
//!
//! This module contains the identifiers, option sets and result payloads shared
//! by the state machine and the catalog client.

pub mod ids;
pub mod options;
pub mod results;

// Re-export commonly used types at the module level
pub use ids::{ALL_SENTINEL, CategoryId, ColorId, FilterValue, InvalidFilterValue, ManufacturerId};
pub use options::{FilterOptions, OptionEntry, OptionSet};
pub use results::ResultSet;
