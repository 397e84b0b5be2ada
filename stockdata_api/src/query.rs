//! Query builder for the `/data/quote` endpoint.

use url::form_urlencoded::byte_serialize;
use url::Url;

/// The set of symbols requested in one call to `/data/quote`.
///
/// Symbol order is preserved in the rendered `symbols` parameter. Each symbol
/// is percent-encoded on its own so the separating commas stay literal, which
/// is what the API expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    pub symbols: Vec<String>,
}

impl QuoteQuery {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of symbols requested.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns `url` with `api_token` and `symbols` set as its query string,
    /// replacing any query the URL already carried.
    pub fn add_to_url(&self, url: &Url, api_token: &str) -> Url {
        let symbols = self
            .symbols
            .iter()
            .map(|s| encode(s))
            .collect::<Vec<_>>()
            .join(",");
        let mut url = url.clone();
        url.set_query(Some(&format!(
            "api_token={}&symbols={}",
            encode(api_token),
            symbols
        )));
        url
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.stockdata.org/v1/data/quote").unwrap()
    }

    #[test]
    fn symbols_are_comma_joined_in_order() {
        let query = QuoteQuery::new(["TSLA", "AAPL", "MSFT"]);
        let url = query.add_to_url(&base(), "secret");
        assert_eq!(
            url.as_str(),
            "https://api.stockdata.org/v1/data/quote?api_token=secret&symbols=TSLA,AAPL,MSFT"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = QuoteQuery::new(["^GSPC", "BRK.B"]);
        let url = query.add_to_url(&base(), "a&b=c");
        assert_eq!(url.query(), Some("api_token=a%26b%3Dc&symbols=%5EGSPC,BRK.B"));
    }

    #[test]
    fn existing_query_is_replaced() {
        let url = Url::parse("https://example.com/data/quote?stale=1").unwrap();
        let rendered = QuoteQuery::new(["AAPL"]).add_to_url(&url, "k");
        assert_eq!(rendered.query(), Some("api_token=k&symbols=AAPL"));
    }

    #[test]
    fn len_counts_symbols() {
        let query = QuoteQuery::new(["A", "B"]);
        assert_eq!(query.len(), 2);
        assert!(!query.is_empty());
        assert!(QuoteQuery::default().is_empty());
    }
}
