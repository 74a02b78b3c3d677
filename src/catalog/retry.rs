//! Exponential backoff retry for catalog requests.
//!
//! - Default: 2 retries with 250ms, 500ms delays
//!
//! Only transient errors are retried. Permanent errors are returned
//! immediately. Retries happen inside the fetch task, so a retrying request
//! never blocks the session loop; if the user moves on meanwhile, the eventual
//! response is discarded as superseded like any other.

use std::future::Future;
use std::time::Duration;

use super::error::{CatalogApiError, CatalogErrorKind};

/// Configuration for exponential backoff retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,

    /// Initial delay before the first retry.
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential growth).
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (typically 2.0).
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Default retry configuration for interactive filtering.
    pub const DEFAULT: Self = Self {
        max_retries: 2,
        initial_delay: Duration::from_millis(250),
        max_delay: Duration::from_secs(2),
        backoff_multiplier: 2.0,
    };

    /// Creates a new retry configuration.
    pub fn new(
        max_retries: u32,
        initial_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_delay,
            backoff_multiplier,
        }
    }

    /// Returns a copy with a different retry budget.
    pub fn with_max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    /// Computes the delay for the given retry attempt (0-indexed).
    ///
    /// The delay grows exponentially: `initial_delay * backoff_multiplier^attempt`,
    /// capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay_secs = self.initial_delay.as_secs_f64() * multiplier;
        let capped_secs = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped_secs)
    }

    /// Returns an iterator over all retry delays.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).map(|attempt| self.delay_for_attempt(attempt))
    }

    /// Computes the total maximum wait time for all retries.
    pub fn total_max_wait(&self) -> Duration {
        self.delays().sum()
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Retry policy for controlling retry behavior at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retry transient errors with exponential backoff.
    #[default]
    RetryTransient,

    /// Do not retry - return errors immediately.
    NoRetry,
}

/// Result of a retry attempt.
#[derive(Debug)]
pub enum RetryResult<T> {
    /// The operation succeeded.
    Success(T),

    /// A transient error occurred after exhausting all retries.
    ExhaustedRetries {
        /// The last error encountered.
        last_error: CatalogApiError,
        /// Number of attempts made (including the initial attempt).
        attempts: u32,
    },

    /// A permanent error occurred (not retriable).
    PermanentError(CatalogApiError),
}

impl<T> RetryResult<T> {
    /// Converts to a Result, treating exhausted retries and permanent errors as Err.
    pub fn into_result(self) -> Result<T, CatalogApiError> {
        match self {
            RetryResult::Success(v) => Ok(v),
            RetryResult::ExhaustedRetries { last_error, .. } => Err(last_error),
            RetryResult::PermanentError(e) => Err(e),
        }
    }

    /// Returns true if the result is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, RetryResult::Success(_))
    }
}

/// Executes an async operation with retry logic.
///
/// The operation is retried according to `config` while it returns transient
/// errors. Permanent errors are returned immediately.
pub async fn retry_with_backoff<T, F, Fut>(
    config: RetryConfig,
    policy: RetryPolicy,
    mut operation: F,
) -> RetryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogApiError>>,
{
    let mut attempt = 0;
    let max_attempts = if policy == RetryPolicy::NoRetry {
        1
    } else {
        config.max_retries + 1
    };

    loop {
        match operation().await {
            Ok(value) => return RetryResult::Success(value),
            Err(e) => {
                attempt += 1;

                match e.kind {
                    CatalogErrorKind::Permanent => return RetryResult::PermanentError(e),
                    CatalogErrorKind::Transient => {
                        if attempt >= max_attempts {
                            return RetryResult::ExhaustedRetries {
                                last_error: e,
                                attempts: attempt,
                            };
                        }

                        tracing::debug!(attempt, error = %e, "Retrying transient catalog failure");
                        let delay = config.delay_for_attempt(attempt - 1);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}
