//! HTTP client for the StockData.org quote API.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::{query::QuoteQuery, types::QuoteResponse, user_agent::USER_AGENT, Error};

/// Production base URL of the StockData.org API.
pub const DEFAULT_BASE_URL: &str = "https://api.stockdata.org/v1/";

/// Request timeout for quote calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the StockData.org quote endpoint.
///
/// Every response is checked before it is handed back: the status must be
/// exactly `200`, the content type must be `application/json`, the body must
/// carry the `meta`/`data` envelope, and `meta.returned` must match the number
/// of requested symbols.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    api_token: String,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_token: &str) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, api_token)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_token: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Builds the exact URL requested for `query`. The same query always
    /// yields the same URL, so the URL doubles as a cache key.
    pub fn quote_url(&self, query: &QuoteQuery) -> Result<Url, Error> {
        let path = format!("{}/data/quote", self.base_api_url.trim_end_matches('/'));
        let url = Url::parse(&path).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}: {}", path, e))
        })?;
        Ok(query.add_to_url(&url, &self.api_token))
    }

    /// Fetches quotes for every symbol in `query` with a single GET request.
    pub async fn get_quotes(&self, query: &QuoteQuery) -> Result<QuoteResponse, Error> {
        let url = self.quote_url(query)?;
        tracing::debug!("GET {}", redact_token(&url));

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to get quotes: {}", e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = resp.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if status != StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        if !is_json_content_type(&content_type) {
            return Err(Error::UnexpectedContentType {
                found: content_type,
            });
        }

        let parsed = QuoteResponse::from_json(&body).map_err(|e| {
            tracing::error!("Failed to parse quotes: {} | body: {}", e, truncate_body(&body));
            e
        })?;
        parsed.validate_count(query.len())?;

        Ok(parsed)
    }
}

/// Renders `url` with the `api_token` query value masked, for logging.
pub fn redact_token(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "api_token" {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    if pairs.is_empty() {
        return redacted.to_string();
    }
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Compares the media type only, so `application/json; charset=utf-8` passes.
fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
