//! HTTP quote source.
//!
//! `GET {endpoint}?tags={tag}` returning either a single quote object or
//! an array whose first element is used. `_id` and `id` are both accepted.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{Quote, QuoteSource};
use crate::error::FetchError;
use crate::storage::QuotesConfig;

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(alias = "_id")]
    id: Option<String>,
    content: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteBody {
    One(RawQuote),
    Many(Vec<RawQuote>),
}

impl RawQuote {
    fn into_quote(self) -> Result<Quote, FetchError> {
        let id = self
            .id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| FetchError::Malformed("missing id".into()))?;
        let content = self
            .content
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| FetchError::Malformed("missing content".into()))?;
        let author = self
            .author
            .ok_or_else(|| FetchError::Malformed("missing author".into()))?;
        Ok(Quote::attributed(id, &content, &author))
    }
}

/// Parse a response body into a quote.
fn parse_body(body: &str) -> Result<Quote, FetchError> {
    let parsed: QuoteBody =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    match parsed {
        QuoteBody::One(raw) => raw.into_quote(),
        QuoteBody::Many(list) => list
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("empty quote list".into()))?
            .into_quote(),
    }
}

pub struct HttpQuoteSource {
    client: Client,
    url: Url,
}

impl HttpQuoteSource {
    /// Build a source from the `[quotes]` config section.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not an absolute URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &QuotesConfig) -> Result<Self, FetchError> {
        let mut url = Url::parse(config.endpoint.trim()).map_err(|e| {
            FetchError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                message: e.to_string(),
            }
        })?;
        if !config.tag.trim().is_empty() {
            url.query_pairs_mut().append_pair("tags", config.tag.trim());
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl QuoteSource for HttpQuoteSource {
    async fn fetch_random(&self) -> Result<Quote, FetchError> {
        let resp = self.client.get(self.url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::ServerGuard) -> QuotesConfig {
        QuotesConfig {
            endpoint: format!("{}/random", server.url()),
            ..QuotesConfig::default()
        }
    }

    #[test]
    fn parse_object_body() {
        let q = parse_body(r#"{"_id":"abc","content":"Stay strong.","author":"Ann"}"#).unwrap();
        assert_eq!(q, Quote::new("abc", "Stay strong. - Ann"));
    }

    #[test]
    fn parse_array_body_takes_first() {
        let q = parse_body(
            r#"[{"id":"a1","content":"First.","author":"X"},{"id":"a2","content":"Second.","author":"Y"}]"#,
        )
        .unwrap();
        assert_eq!(q.id, "a1");
    }

    #[test]
    fn parse_rejects_missing_fields() {
        assert!(matches!(
            parse_body(r#"{"content":"No id","author":"X"}"#),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_body(r#"{"_id":"x","author":"X"}"#),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_body(r#"{"_id":"x","content":"   ","author":"X"}"#),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_body(r#"{"_id":"x","content":"Hi"}"#),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(parse_body("[]"), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_body("<html>"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn tag_is_added_as_query() {
        let cfg = QuotesConfig {
            endpoint: "https://quotes.example.com/random".into(),
            tag: "hope".into(),
            ..QuotesConfig::default()
        };
        let source = HttpQuoteSource::new(&cfg).unwrap();
        assert_eq!(source.url().as_str(), "https://quotes.example.com/random?tags=hope");
    }

    #[test]
    fn relative_endpoint_rejected() {
        let cfg = QuotesConfig {
            endpoint: "/random".into(),
            ..QuotesConfig::default()
        };
        assert!(matches!(
            HttpQuoteSource::new(&cfg),
            Err(FetchError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn fetches_quote_with_tag_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/random")
            .match_query(Matcher::UrlEncoded("tags".into(), "inspirational".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"_id":"q42","content":"Begin again.","author":"Someone"}"#)
            .create_async()
            .await;

        let source = HttpQuoteSource::new(&config_for(&server)).unwrap();
        let quote = source.fetch_random().await.unwrap();

        assert_eq!(quote, Quote::new("q42", "Begin again. - Someone"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source = HttpQuoteSource::new(&config_for(&server)).unwrap();
        let result = source.fetch_random().await;
        assert!(matches!(result, Err(FetchError::Status(503))));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let source = HttpQuoteSource::new(&config_for(&server)).unwrap();
        let result = source.fetch_random().await;
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}
