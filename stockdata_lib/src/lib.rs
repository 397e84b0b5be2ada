//! Library layer for telegraf-stockdata: cached quote fetching, payload
//! conversion, and rendering for InfluxDB.
//!
//! Wraps the `stockdata_api` crate with a URL-keyed response cache, plans
//! request batches under the provider's symbol limit, and turns each quote
//! into tags and fields ready for line protocol or JSON output.

pub mod batch;
pub mod cache;
pub mod client;
pub mod convert;
pub mod emit;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod validation;

pub use stockdata_api;
pub use stockdata_api::types;
pub use stockdata_api::{QuoteQuery, DEFAULT_BASE_URL, USER_AGENT};

pub use batch::{plan_batches, TickerBatch, MAX_BATCH_SIZE};
pub use cache::{FileCache, MemoryCache, ResponseCache, CACHE_TTL};
pub use client::{CachedClient, FetchedBatch};
pub use convert::{convert_record, ConvertedRecord, QuoteValue};
pub use emit::OutputFormat;
pub use error::{ErrorKind, StockDataError};
pub use normalize::camel_to_snake;
pub use pipeline::{run, RunSummary};
