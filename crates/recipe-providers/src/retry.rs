// ABOUTME: Exponential backoff with jitter for retryable provider failures
// ABOUTME: Honors Retry-After hints from rate-limited responses up to a ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{RecipeError, RecipeResult};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of attempts including the first one
const DEFAULT_MAX_ATTEMPTS: u32 = 2;
/// Default delay before the first retry
const DEFAULT_BASE_DELAY_MS: u64 = 250;
/// Default upper bound on any single delay
const DEFAULT_MAX_DELAY_MS: u64 = 2_000;
/// Default random spread added to each delay
const DEFAULT_JITTER_FACTOR: f64 = 0.1;

/// Retry policy for network and rate-limit failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryBackoffConfig {
    /// Total attempts, including the first (values below 1 behave as 1)
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each attempt
    pub base_delay_ms: u64,
    /// Ceiling for any single delay; a longer `Retry-After` hint ends the retries
    pub max_delay_ms: u64,
    /// Fraction of the delay added as random jitter (0.0 - 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryBackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            jitter_factor: DEFAULT_JITTER_FACTOR,
        }
    }
}

impl RetryBackoffConfig {
    /// Policy that never retries
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
            jitter_factor: 0.0,
        }
    }

    /// Whether the server asked for a longer wait than any allowed delay
    #[must_use]
    pub fn hint_exceeds_ceiling(&self, error: &RecipeError) -> bool {
        error
            .retry_after_secs()
            .is_some_and(|secs| secs.saturating_mul(1_000) > self.max_delay_ms)
    }

    /// Delay to wait after the given failed attempt (1-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32, error: &RecipeError) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let backoff = self.base_delay_ms.saturating_mul(1_u64 << exponent);
        let hinted = error
            .retry_after_secs()
            .map_or(0, |secs| secs.saturating_mul(1_000));
        let base = backoff.max(hinted).min(self.max_delay_ms);

        let spread = self.jitter_factor.clamp(0.0, 1.0);
        let jitter = if spread > 0.0 && base > 0 {
            (base as f64 * spread * rand::thread_rng().gen::<f64>()) as u64
        } else {
            0
        };

        Duration::from_millis(base.saturating_add(jitter).min(self.max_delay_ms.max(base)))
    }
}

/// Run `operation`, retrying retryable failures with exponential backoff
///
/// Non-retryable errors and the error of the final attempt are returned
/// unchanged. A rate limit whose `Retry-After` hint exceeds `max_delay_ms`
/// is returned at once rather than retried before the server allows it.
///
/// # Errors
///
/// Returns the last error produced by `operation`
pub async fn with_retry<T, F, Fut>(
    config: &RetryBackoffConfig,
    operation_name: &str,
    mut operation: F,
) -> RecipeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RecipeResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if config.hint_exceeds_ceiling(&error) => {
                warn!(
                    operation = operation_name,
                    attempt,
                    retry_after_secs = error.retry_after_secs(),
                    max_delay_ms = config.max_delay_ms,
                    "Retry-After exceeds the backoff ceiling, not retrying"
                );
                return Err(error);
            }
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                let delay = config.delay_for_attempt(attempt, &error);
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retryable failure, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
