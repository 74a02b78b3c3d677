//! HTTP client for the catalog services.
//!
//! `HttpCatalogClient` wraps a `reqwest::Client` and a base URL and speaks the
//! three endpoints the filter engine consumes:
//!
//! - `GET /api/categories` returns `[{category_id, name}]`
//! - `GET /api/filter_options?category_id=..&manufacturer_id=..` returns
//!   `{manufacturers: [..], colors: [..]}`
//! - `GET /api/auto_search?category_id=..&manufacturer_id=..&color_id=..`
//!   returns an opaque payload, passed through untouched

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::effects::{CatalogEffect, CatalogInterpreter, CatalogResponse};
use crate::types::{CategoryId, FilterOptions, OptionSet, ResultSet};

use super::error::CatalogApiError;
use super::query::{OptionsQuery, SearchQuery};
use super::wire::{CategoryRow, FilterOptionsBody, categories_from_rows};

pub const CATEGORIES_PATH: &str = "/api/categories";
pub const FILTER_OPTIONS_PATH: &str = "/api/filter_options";
pub const SEARCH_PATH: &str = "/api/auto_search";

/// A catalog client bound to one backend.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `timeout` bounds each request; `None` lets a hung request wait forever.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CatalogApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CatalogApiError::from_reqwest)?;

        Ok(Self::from_client(client, base_url))
    }

    /// Creates a client from a pre-configured `reqwest::Client`.
    pub fn from_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the static category list.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<OptionSet<CategoryId>, CatalogApiError> {
        let response = self
            .client
            .get(self.url(CATEGORIES_PATH))
            .send()
            .await
            .map_err(CatalogApiError::from_reqwest)?;

        let rows: Vec<CategoryRow> = decode_json(response).await?;
        debug!(count = rows.len(), "Loaded category list");
        Ok(categories_from_rows(rows))
    }

    /// Fetches the manufacturer and color sets for a category/manufacturer pair.
    #[instrument(
        skip(self),
        fields(category = %query.category, manufacturer = %query.manufacturer)
    )]
    pub async fn list_options(
        &self,
        query: &OptionsQuery,
    ) -> Result<FilterOptions, CatalogApiError> {
        let response = self
            .client
            .get(self.url(FILTER_OPTIONS_PATH))
            .query(query)
            .send()
            .await
            .map_err(CatalogApiError::from_reqwest)?;

        let body: FilterOptionsBody = decode_json(response).await?;
        debug!(
            manufacturers = body.manufacturers.len(),
            colors = body.colors.len(),
            "Loaded filter options"
        );
        Ok(body.into())
    }

    /// Runs a search and returns the payload as received.
    #[instrument(
        skip(self),
        fields(
            category = %query.category,
            manufacturer = %query.manufacturer,
            color = %query.color
        )
    )]
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultSet, CatalogApiError> {
        let response = self
            .client
            .get(self.url(SEARCH_PATH))
            .query(query)
            .send()
            .await
            .map_err(CatalogApiError::from_reqwest)?;

        let response = check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(CatalogApiError::from_reqwest)?;
        debug!(bytes = body.len(), "Received search results");
        Ok(ResultSet::new(body))
    }
}

impl CatalogInterpreter for HttpCatalogClient {
    async fn interpret(&self, effect: CatalogEffect) -> Result<CatalogResponse, CatalogApiError> {
        match effect {
            CatalogEffect::ListCategories => {
                let categories = self.list_categories().await?;
                Ok(CatalogResponse::Categories(categories))
            }
            CatalogEffect::ListOptions(query) => {
                let options = self.list_options(&query).await?;
                Ok(CatalogResponse::Options(options))
            }
            CatalogEffect::Search(query) => {
                let results = self.search(&query).await?;
                Ok(CatalogResponse::Results(results))
            }
        }
    }
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Turns a non-success status into a categorized error, keeping the body as
/// the message.
async fn check_status(response: Response) -> Result<Response, CatalogApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CatalogApiError::from_status(status.as_u16(), &body))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogApiError> {
    let response = check_status(response).await?;
    response.json().await.map_err(CatalogApiError::from_reqwest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpCatalogClient::from_client(Client::new(), "http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url(FILTER_OPTIONS_PATH),
            "http://localhost:5000/api/filter_options"
        );
    }

    #[test]
    fn debug_hides_transport() {
        let client = HttpCatalogClient::from_client(Client::new(), "http://catalog");
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("http://catalog"));
        assert!(rendered.ends_with(".. }"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transient() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpCatalogClient::new(format!("http://{}", addr), Some(Duration::from_secs(2)))
                .unwrap();
        let err = client.list_categories().await.unwrap_err();
        assert!(err.kind.is_retriable());
    }
}
