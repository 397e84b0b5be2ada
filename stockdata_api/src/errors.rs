//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The HTTP request failed before a response arrived (network error, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API answered with something other than `200 OK`.
    #[error("Unexpected response code {status}, expected 200")]
    HttpStatus { status: u16, body: String },
    /// The API answered with a non-JSON content type.
    #[error("Unexpected content-type {found}, expected application/json")]
    UnexpectedContentType { found: String },
    /// The response body is not valid JSON or does not match the envelope types.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// A required top-level key of the envelope is absent.
    #[error("Response does not contain {0}")]
    MissingEnvelope(&'static str),
    /// `meta.returned` disagrees with the number of requested symbols.
    #[error("Requested {requested} tickers, but only received {returned}")]
    CountMismatch { requested: usize, returned: u64 },
    /// `meta.returned` disagrees with the length of `data`.
    #[error("Response meta reports {returned} quotes, but data holds {actual}")]
    DataLengthMismatch { returned: u64, actual: usize },
}

impl Error {
    /// True for failures of the transport itself rather than of the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RequestFailed(_) | Error::HttpStatus { .. })
    }
}
