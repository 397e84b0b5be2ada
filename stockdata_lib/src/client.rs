//! Caching wrapper around the API client.

use stockdata_api::types::{QuoteRecord, QuoteResponse};
use stockdata_api::{redact_token, Client, QuoteQuery};

use crate::batch::TickerBatch;
use crate::cache::ResponseCache;
use crate::error::StockDataError;

/// API client wrapper that reads through a response cache.
///
/// Cache hits bypass the network entirely but are validated against the
/// batch exactly like a fresh response. Only fully validated responses are
/// stored.
pub struct CachedClient {
    inner: Client,
    cache: Box<dyn ResponseCache>,
}

/// The quotes for one batch and where they came from.
#[derive(Debug, Clone)]
pub struct FetchedBatch {
    pub records: Vec<QuoteRecord>,
    pub from_cache: bool,
}

impl CachedClient {
    pub fn new(inner: Client, cache: Box<dyn ResponseCache>) -> Self {
        Self { inner, cache }
    }

    /// Creates a cached client against a custom base URL. Used for testing.
    pub fn with_base_url(
        base_url: &str,
        api_token: &str,
        cache: Box<dyn ResponseCache>,
    ) -> Result<Self, StockDataError> {
        Ok(Self::new(Client::with_base_url(base_url, api_token)?, cache))
    }

    /// Fetches the quotes for `batch`, returning cached results when available.
    pub async fn get_quotes(&self, batch: &TickerBatch) -> Result<FetchedBatch, StockDataError> {
        let query = QuoteQuery::new(batch.symbols().iter().cloned());
        let url = self.inner.quote_url(&query)?;
        let cache_key = url.to_string();

        if let Some(cached) = self.cache.get(&cache_key) {
            match QuoteResponse::from_json(&cached) {
                Ok(resp) => {
                    resp.validate_count(batch.len())?;
                    tracing::debug!("Cache hit for {}", redact_token(&url));
                    return Ok(FetchedBatch {
                        records: resp.data,
                        from_cache: true,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Discarding unreadable cached response for {}: {}",
                        redact_token(&url),
                        e
                    );
                }
            }
        }

        tracing::debug!("Cache miss for {}", redact_token(&url));
        let resp = self.inner.get_quotes(&query).await?;
        match serde_json::to_string(&resp) {
            Ok(json) => {
                if let Err(e) = self.cache.set(&cache_key, json) {
                    tracing::warn!("Failed to cache response: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize response for caching: {}", e),
        }
        Ok(FetchedBatch {
            records: resp.data,
            from_cache: false,
        })
    }
}
