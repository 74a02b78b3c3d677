//! Catalog service error types.
//!
//! Errors are categorized for retry decisions:
//!
//! - **Transient** errors are retriable (5xx, 408, 429, timeouts, refused connections)
//! - **Permanent** errors will not fix themselves (other 4xx, malformed bodies)
//!
//! Either way the session treats the failure as a non-fatal notice; the
//! distinction only controls whether the executor tries again first.

use std::fmt;
use thiserror::Error;

/// The kind of catalog error, categorized for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Safe to retry with backoff.
    Transient,

    /// Retrying the same request will fail the same way.
    Permanent,
}

impl CatalogErrorKind {
    /// Returns true if this error is retriable.
    pub fn is_retriable(&self) -> bool {
        matches!(self, CatalogErrorKind::Transient)
    }
}

/// A failed request to one of the catalog services.
#[derive(Debug, Error)]
pub struct CatalogApiError {
    /// The kind of error (transient or permanent).
    pub kind: CatalogErrorKind,

    /// The HTTP status code, if a response was received.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying transport error, if available.
    #[source]
    pub source: Option<reqwest::Error>,
}

impl fmt::Display for CatalogApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "catalog error (HTTP {}): {}", code, self.message),
            None => write!(f, "catalog error: {}", self.message),
        }
    }
}

impl CatalogApiError {
    /// Creates a permanent error without a transport source.
    pub fn permanent_without_source(message: impl Into<String>) -> Self {
        Self {
            kind: CatalogErrorKind::Permanent,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transient error without a transport source.
    pub fn transient_without_source(message: impl Into<String>) -> Self {
        Self {
            kind: CatalogErrorKind::Transient,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Categorizes a non-success HTTP status returned by a service.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = status_kind(status);
        let message = if body.trim().is_empty() {
            format!("service returned status {}", status)
        } else {
            truncate(body.trim(), 200).to_string()
        };

        Self {
            kind,
            status_code: Some(status),
            message,
            source: None,
        }
    }

    /// Categorizes a reqwest error.
    ///
    /// Timeouts and connection failures are transient. Errors carrying a
    /// status are categorized by status. Body decode failures and request
    /// construction failures are permanent.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());

        let kind = if err.is_timeout() || err.is_connect() {
            CatalogErrorKind::Transient
        } else if let Some(code) = status_code {
            status_kind(code)
        } else if err.is_decode() || err.is_builder() {
            CatalogErrorKind::Permanent
        } else if is_network_error(&err.to_string()) {
            CatalogErrorKind::Transient
        } else {
            CatalogErrorKind::Permanent
        };

        Self {
            kind,
            status_code,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

fn status_kind(status: u16) -> CatalogErrorKind {
    match status {
        408 | 429 => CatalogErrorKind::Transient,
        code if (500..600).contains(&code) => CatalogErrorKind::Transient,
        _ => CatalogErrorKind::Permanent,
    }
}

/// Checks if an error message indicates a network-level error.
fn is_network_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("timeout")
        || message_lower.contains("connection")
        || message_lower.contains("network")
        || message_lower.contains("dns")
        || message_lower.contains("timed out")
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
