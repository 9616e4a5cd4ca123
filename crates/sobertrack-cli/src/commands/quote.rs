use sobertrack_core::{Config, Database, HttpQuoteSource, QuoteFetcher, RetryPolicy};

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let source = HttpQuoteSource::new(&config.quotes)?;
    let fetcher = QuoteFetcher::with_policy(source, &db, RetryPolicy::from(&config.quotes));

    let quote = fetcher.fetch_quote().await;
    tracing::debug!(id = %quote.id, fallback = quote.is_fallback(), "quote ready");
    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("{}", quote.text);
    }
    Ok(())
}
