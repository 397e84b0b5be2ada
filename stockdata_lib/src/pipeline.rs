//! The fetch, convert, and emit loop.

use std::io::Write;

use crate::batch::{plan_batches, MAX_BATCH_SIZE};
use crate::client::CachedClient;
use crate::convert::convert_record;
use crate::emit::OutputFormat;
use crate::error::StockDataError;

/// Counts gathered over one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub cache_hits: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Fetches every ticker in batches and writes one line per quote to `out`.
///
/// Batches run strictly one after another. The first error ends the run;
/// lines written for earlier batches are already flushed and stay written.
/// An empty measurement name is rejected before any request is made.
pub async fn run<W: Write>(
    client: &CachedClient,
    tickers: &[String],
    measurement: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<RunSummary, StockDataError> {
    if measurement.is_empty() {
        return Err(StockDataError::InvalidInput(
            "Measurement name must not be empty".to_string(),
        ));
    }
    let batches = plan_batches(tickers, MAX_BATCH_SIZE)?;
    let mut summary = RunSummary::default();

    for batch in &batches {
        let fetched = client.get_quotes(batch).await?;
        summary.batches += 1;
        if fetched.from_cache {
            summary.cache_hits += 1;
        }

        for record in &fetched.records {
            let converted = convert_record(record)?;
            match format.render(measurement, &converted) {
                Some(line) => {
                    writeln!(out, "{}", line)?;
                    summary.records += 1;
                }
                None => {
                    tracing::warn!(
                        "Skipping quote {} with no numeric fields",
                        record
                            .get("ticker")
                            .and_then(|v| v.as_str())
                            .unwrap_or("<unknown>")
                    );
                    summary.skipped += 1;
                }
            }
        }
        out.flush()?;
    }

    Ok(summary)
}
