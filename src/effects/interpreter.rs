//! Effect interpreter trait.
//!
//! The trait-based design enables:
//! - The HTTP client used in production
//! - Scripted interpreters in tests that release responses out of order

use std::future::Future;

use crate::catalog::CatalogApiError;

use super::{CatalogEffect, CatalogResponse};

/// Interprets catalog effects against the catalog services.
///
/// A successful response must match the effect's kind: `ListCategories`
/// yields `Categories`, `ListOptions` yields `Options`, `Search` yields
/// `Results`.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct FixedCatalog(FilterOptions);
///
/// impl CatalogInterpreter for FixedCatalog {
///     async fn interpret(
///         &self,
///         effect: CatalogEffect,
///     ) -> Result<CatalogResponse, CatalogApiError> {
///         match effect {
///             CatalogEffect::ListOptions(_) => Ok(CatalogResponse::Options(self.0.clone())),
///             _ => Err(CatalogApiError::permanent_without_source("unsupported")),
///         }
///     }
/// }
/// ```
pub trait CatalogInterpreter {
    /// Execute a catalog effect and return its response.
    fn interpret(
        &self,
        effect: CatalogEffect,
    ) -> impl Future<Output = Result<CatalogResponse, CatalogApiError>> + Send;
}
