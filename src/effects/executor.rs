//! Effect execution with retry and cancellation support.
//!
//! `CatalogExecutor` runs a [`TaggedEffect`] against a [`CatalogInterpreter`],
//! retrying transient failures, and packages the outcome as a [`Completion`]
//! for the session to apply or discard. Executors are cheap to clone and are
//! moved into one task per in-flight fetch.

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

use crate::catalog::{CatalogApiError, RetryConfig, RetryPolicy, retry_with_backoff};

use super::{CatalogEffect, CatalogInterpreter, CatalogResponse, Completion, TaggedEffect};

/// Executes catalog effects with retry and shutdown support.
#[derive(Debug, Clone)]
pub struct CatalogExecutor<C> {
    catalog: C,
    retry: RetryConfig,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl<C> CatalogExecutor<C>
where
    C: CatalogInterpreter,
{
    /// Creates a new executor.
    pub fn new(
        catalog: C,
        retry: RetryConfig,
        policy: RetryPolicy,
        cancel: CancellationToken,
    ) -> Self {
        CatalogExecutor {
            catalog,
            retry,
            policy,
            cancel,
        }
    }

    /// Returns the interpreter this executor runs effects against.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Executes an effect.
    ///
    /// Returns `None` if shutdown was requested before or during the fetch;
    /// otherwise the completion carries the generation the effect was issued
    /// at, whatever the outcome.
    #[instrument(skip(self), fields(generation = %tagged.generation, kind = %tagged.effect.kind()))]
    pub async fn execute(&self, tagged: TaggedEffect) -> Option<Completion> {
        if self.cancel.is_cancelled() {
            debug!("Cancellation detected before effect execution");
            return None;
        }

        let TaggedEffect { generation, effect } = tagged;
        let kind = effect.kind();

        let fetch = retry_with_backoff(self.retry, self.policy, || {
            self.catalog.interpret(effect.clone())
        });

        let result = tokio::select! {
            biased;

            _ = self.cancel.cancelled() => {
                debug!("Catalog fetch cancelled");
                return None;
            }
            result = fetch => result.into_result(),
        };

        let result = result.and_then(|response| check_response_kind(&effect, response));
        trace!(ok = result.is_ok(), "Catalog fetch finished");

        Some(Completion::new(generation, kind, result))
    }
}

/// Rejects a response whose shape does not match the effect that produced it.
fn check_response_kind(
    effect: &CatalogEffect,
    response: CatalogResponse,
) -> Result<CatalogResponse, CatalogApiError> {
    let matches = matches!(
        (effect, &response),
        (CatalogEffect::ListCategories, CatalogResponse::Categories(_))
            | (CatalogEffect::ListOptions(_), CatalogResponse::Options(_))
            | (CatalogEffect::Search(_), CatalogResponse::Results(_))
    );

    if matches {
        Ok(response)
    } else {
        Err(CatalogApiError::permanent_without_source(format!(
            "{} request answered with a mismatched response",
            effect.kind()
        )))
    }
}
