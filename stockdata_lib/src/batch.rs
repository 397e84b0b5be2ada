//! Request batching under the provider's per-request symbol limit.

use crate::error::StockDataError;

/// Most symbols StockData.org answers in one `/data/quote` call.
pub const MAX_BATCH_SIZE: usize = 3;

/// An ordered group of symbols fetched with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerBatch(Vec<String>);

impl TickerBatch {
    pub fn symbols(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Splits `tickers` into consecutive batches of `max_size`, the last batch
/// taking whatever remains. Concatenating the batches gives back `tickers`.
pub fn plan_batches(
    tickers: &[String],
    max_size: usize,
) -> Result<Vec<TickerBatch>, StockDataError> {
    if tickers.is_empty() {
        return Err(StockDataError::InvalidInput(
            "at least one ticker is required".to_string(),
        ));
    }
    if max_size == 0 {
        return Err(StockDataError::InvalidInput(
            "batch size must be positive".to_string(),
        ));
    }
    Ok(tickers
        .chunks(max_size)
        .map(|chunk| TickerBatch(chunk.to_vec()))
        .collect())
}
