use crate::error::StockDataError;

pub const MAX_TICKER_LENGTH: usize = 20;

/// Splits a comma-separated `--tickers` value into symbols.
///
/// Symbols are trimmed and upper-cased; empty entries from doubled or
/// trailing commas are skipped. Only ASCII letters, digits, and `.-^=` are
/// accepted, which covers share classes (`BRK.B`), indices (`^GSPC`), and
/// currency pairs (`EURUSD=X`). Duplicates are kept.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, StockDataError> {
    let mut tickers = Vec::new();
    for raw in input.split(',') {
        let symbol = raw.trim();
        if symbol.is_empty() {
            continue;
        }
        tickers.push(validate_ticker(symbol)?);
    }
    if tickers.is_empty() {
        return Err(StockDataError::InvalidInput(
            "no ticker symbols given".to_string(),
        ));
    }
    Ok(tickers)
}

/// Validates and upper-cases a single ticker symbol.
pub fn validate_ticker(symbol: &str) -> Result<String, StockDataError> {
    if symbol.len() > MAX_TICKER_LENGTH {
        return Err(StockDataError::InvalidInput(format!(
            "ticker {} exceeds maximum length of {} bytes",
            symbol, MAX_TICKER_LENGTH
        )));
    }
    if let Some(bad) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(StockDataError::InvalidInput(format!(
            "ticker {:?} contains invalid character {:?}",
            symbol, bad
        )));
    }
    Ok(symbol.to_ascii_uppercase())
}
