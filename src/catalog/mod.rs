//! Access to the catalog services.
//!
//! - [`HttpCatalogClient`]: reqwest-backed client implementing
//!   [`CatalogInterpreter`](crate::effects::CatalogInterpreter)
//! - [`OptionsQuery`] / [`SearchQuery`]: request parameters with the `all`
//!   sentinel serialized literally
//! - [`CatalogApiError`]: transient/permanent categorization
//! - [`retry_with_backoff`]: exponential backoff for transient failures

pub mod client;
pub mod error;
pub mod query;
pub mod retry;
pub mod wire;

pub use client::HttpCatalogClient;
pub use error::{CatalogApiError, CatalogErrorKind};
pub use query::{OptionsQuery, SearchQuery};
pub use retry::{RetryConfig, RetryPolicy, RetryResult, retry_with_backoff};
pub use wire::{CategoryRow, ColorRow, FilterOptionsBody, ManufacturerRow};
