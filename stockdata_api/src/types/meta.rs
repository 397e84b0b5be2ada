use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::QuoteRecord;
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<u64>,
    pub returned: u64,
}

/// The `meta`/`data` envelope returned by `/data/quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub meta: Meta,
    pub data: Vec<QuoteRecord>,
}

impl QuoteResponse {
    /// Decodes a response body, reporting a missing `meta` or `data` key
    /// distinctly from other decoding failures.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| Error::ParseFailed(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::ParseFailed("response is not a JSON object".to_string()))?;
        for key in ["meta", "data"] {
            if !object.contains_key(key) {
                return Err(Error::MissingEnvelope(key));
            }
        }
        serde_json::from_value(value).map_err(|e| Error::ParseFailed(e.to_string()))
    }

    /// Checks that the API answered for exactly `requested` symbols.
    pub fn validate_count(&self, requested: usize) -> Result<(), Error> {
        if self.meta.returned != requested as u64 {
            return Err(Error::CountMismatch {
                requested,
                returned: self.meta.returned,
            });
        }
        if self.data.len() as u64 != self.meta.returned {
            return Err(Error::DataLengthMismatch {
                returned: self.meta.returned,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}
