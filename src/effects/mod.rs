//! Effects-as-data for catalog requests.
//!
//! The session's pure core never talks to the network. It returns
//! [`TaggedEffect`]s describing the request to make and the generation of the
//! state that asked for it. This enables:
//! - Deterministic tests that deliver responses in any order
//! - Logging of intended requests
//! - Staleness checks against the generation when the response comes back

use crate::catalog::{CatalogApiError, OptionsQuery, SearchQuery};
use crate::state::Generation;
use crate::types::{CategoryId, FilterOptions, OptionSet, ResultSet};

pub mod executor;
pub mod interpreter;

pub use executor::CatalogExecutor;
pub use interpreter::CatalogInterpreter;

/// A request to one of the catalog services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEffect {
    /// Load the static category list.
    ListCategories,

    /// Load the manufacturer and color sets for a category/manufacturer pair.
    ListOptions(OptionsQuery),

    /// Load the result set for a full selection.
    Search(SearchQuery),
}

impl CatalogEffect {
    pub fn kind(&self) -> FetchKind {
        match self {
            CatalogEffect::ListCategories => FetchKind::Categories,
            CatalogEffect::ListOptions(_) => FetchKind::Options,
            CatalogEffect::Search(_) => FetchKind::Search,
        }
    }
}

/// The successful response to a [`CatalogEffect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogResponse {
    Categories(OptionSet<CategoryId>),
    Options(FilterOptions),
    Results(ResultSet),
}

/// Which service a fetch went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Categories,
    Options,
    Search,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FetchKind::Categories => "category list",
            FetchKind::Options => "filter options",
            FetchKind::Search => "search results",
        })
    }
}

/// An effect stamped with the generation current when it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEffect {
    pub generation: Generation,
    pub effect: CatalogEffect,
}

impl TaggedEffect {
    pub fn new(generation: Generation, effect: CatalogEffect) -> Self {
        TaggedEffect { generation, effect }
    }
}

/// The outcome of executing a [`TaggedEffect`], carried back to the session.
#[derive(Debug)]
pub struct Completion {
    pub generation: Generation,
    pub kind: FetchKind,
    pub result: Result<CatalogResponse, CatalogApiError>,
}

impl Completion {
    pub fn new(
        generation: Generation,
        kind: FetchKind,
        result: Result<CatalogResponse, CatalogApiError>,
    ) -> Self {
        Completion {
            generation,
            kind,
            result,
        }
    }
}
