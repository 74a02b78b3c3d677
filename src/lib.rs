//! Catalog Cascade - a cascading filter engine for a product catalog.
//!
//! Three dependent filters (category, manufacturer, color) are kept mutually
//! consistent while option lists and search results are fetched from remote
//! services whose responses may arrive in any order.

pub mod catalog;
pub mod effects;
pub mod session;
pub mod state;
pub mod sync;
pub mod types;

#[cfg(test)]
pub mod test_utils;
