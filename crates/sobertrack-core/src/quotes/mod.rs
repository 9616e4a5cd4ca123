//! Daily motivational quotes.
//!
//! - [`QuoteSource`]: where quotes come from (HTTP in production)
//! - [`QuoteFetcher`]: retry, dedup against the last shown quote, fallback

mod client;
mod fetcher;

pub use client::HttpQuoteSource;
pub use fetcher::{QuoteFetcher, RetryPolicy};

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Sentinel id of the built-in quote.
pub const FALLBACK_ID: &str = "fallback";

const FALLBACK_TEXT: &str =
    "One day at a time. Every sober day is a victory worth celebrating.";

/// A quote ready for display or a notification body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Opaque id, only compared for dedup.
    pub id: String,
    /// Content with attribution appended when known.
    pub text: String,
}

impl Quote {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Build display text from content and author.
    pub fn attributed(id: impl Into<String>, content: &str, author: &str) -> Self {
        let content = content.trim();
        let author = author.trim();
        let text = if author.is_empty() {
            content.to_string()
        } else {
            format!("{content} - {author}")
        };
        Self::new(id, text)
    }

    /// The always-available local quote.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_ID, FALLBACK_TEXT)
    }

    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_ID
    }
}

/// A remote provider of random quotes.
///
/// One call is one attempt; retrying is the fetcher's job.
pub trait QuoteSource {
    fn fetch_random(&self) -> impl Future<Output = Result<Quote, FetchError>> + Send;
}

impl<Q: QuoteSource + Sync + ?Sized> QuoteSource for &Q {
    fn fetch_random(&self) -> impl Future<Output = Result<Quote, FetchError>> + Send {
        (**self).fetch_random()
    }
}
