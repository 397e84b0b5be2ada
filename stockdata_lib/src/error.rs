//! Error types for the library layer.

use thiserror::Error;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding input, conversion, cache, and output failures.
#[derive(Error, Debug)]
pub enum StockDataError {
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] stockdata_api::Error),
    /// A quote field held a JSON value that is neither string, number, boolean, nor null.
    #[error("Cannot convert field {key}: unsupported {kind} value")]
    Conversion { key: String, kind: &'static str },
    /// The response cache could not be opened.
    #[error("Cache error: {0}")]
    Cache(String),
    /// Writing rendered records failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Coarse classification of [`StockDataError`], used to pick the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Transport,
    Protocol,
    Conversion,
    Cache,
    Output,
}

impl ErrorKind {
    /// Process exit code for this kind, following `sysexits.h`.
    ///
    /// | kind | code |
    /// |------|------|
    /// | `InvalidInput` | 64 (`EX_USAGE`) |
    /// | `Conversion` | 65 (`EX_DATAERR`) |
    /// | `Transport` | 69 (`EX_UNAVAILABLE`) |
    /// | `Cache`, `Output` | 74 (`EX_IOERR`) |
    /// | `Protocol` | 76 (`EX_PROTOCOL`) |
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidInput => 64,
            ErrorKind::Conversion => 65,
            ErrorKind::Transport => 69,
            ErrorKind::Cache | ErrorKind::Output => 74,
            ErrorKind::Protocol => 76,
        }
    }
}

impl StockDataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Api(stockdata_api::Error::InvalidUrl(_)) => ErrorKind::InvalidInput,
            Self::Api(e) if e.is_transport() => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Protocol,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Cache(_) => ErrorKind::Cache,
            Self::Output(_) => ErrorKind::Output,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}
