//! Resilient quote fetching.
//!
//! One attempt budget covers both failed requests and quotes that repeat
//! the last shown id. When the budget runs out the built-in quote is
//! returned; callers never see an error.

use std::time::Duration;

use super::{Quote, QuoteSource};
use crate::storage::{KeyValueStore, Preferences, QuotesConfig};

/// Attempt budget and fixed inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&QuotesConfig> for RetryPolicy {
    fn from(config: &QuotesConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: config.retry_delay(),
        }
    }
}

pub struct QuoteFetcher<Q, S> {
    source: Q,
    prefs: Preferences<S>,
    policy: RetryPolicy,
}

impl<Q: QuoteSource, S: KeyValueStore> QuoteFetcher<Q, S> {
    pub fn new(source: Q, store: S) -> Self {
        Self::with_policy(source, store, RetryPolicy::default())
    }

    pub fn with_policy(source: Q, store: S, policy: RetryPolicy) -> Self {
        Self {
            source,
            prefs: Preferences::new(store),
            policy,
        }
    }

    /// Fetch a quote that differs from the last one shown.
    ///
    /// The new id is persisted only once a complete quote is in hand. A
    /// failed read or write of the last id is logged and otherwise ignored.
    pub async fn fetch_quote(&self) -> Quote {
        let last_id = match self.prefs.last_quote_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "could not read last quote id");
                None
            }
        };

        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.delay).await;
            }

            match self.source.fetch_random().await {
                Ok(quote) if last_id.as_deref() == Some(quote.id.as_str()) => {
                    tracing::debug!(attempt, id = %quote.id, "quote repeats last shown id");
                }
                Ok(quote) => {
                    if let Err(e) = self.prefs.set_last_quote_id(&quote.id) {
                        tracing::warn!(error = %e, id = %quote.id, "could not store last quote id");
                    }
                    tracing::debug!(attempt, id = %quote.id, "fetched quote");
                    return quote;
                }
                Err(e) => {
                    tracing::warn!(attempt, max_attempts, error = %e, "quote fetch failed");
                }
            }
        }

        tracing::warn!(max_attempts, "quote source exhausted, using fallback quote");
        Quote::fallback()
    }
}
