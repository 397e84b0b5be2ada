use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stockdata_lib::validation::parse_tickers;
use stockdata_lib::{
    CachedClient, FileCache, MemoryCache, OutputFormat, ResponseCache, RunSummary,
    StockDataError, CACHE_TTL, DEFAULT_BASE_URL,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Exit code for failures that carry no library error kind.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "telegraf-stockdata")]
#[command(
    about = "Retrieves stock information from StockData.org and formats it in InfluxDB line protocol"
)]
struct Cli {
    /// StockData.org API key
    #[arg(long, env = "STOCKDATA_API_KEY", hide_env_values = true)]
    apikey: String,

    /// Output in JSON instead of InfluxDB line protocol
    #[arg(long)]
    json: bool,

    /// Measurement name for InfluxDB
    #[arg(long, default_value = "stocks")]
    measurement: String,

    /// Comma-separated ticker symbols (e.g. AAPL,MSFT,BRK.B)
    #[arg(long)]
    tickers: String,

    /// Base URL of the StockData.org API
    #[arg(long, env = "STOCKDATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory for cached API responses [default: user config dir]
    #[arg(long, env = "STOCKDATA_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Keep responses in memory only instead of the on-disk cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(summary) => {
            tracing::debug!(
                "Fetched {} batches ({} cached), emitted {} records, skipped {}",
                summary.batches,
                summary.cache_hits,
                summary.records,
                summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: &Cli) -> Result<RunSummary> {
    let tickers = parse_tickers(&cli.tickers)?;
    let cache = open_cache(cli)?;
    let client = CachedClient::with_base_url(&cli.base_url, &cli.apikey, cache)?;
    let format = OutputFormat::from_json_flag(cli.json);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary =
        stockdata_lib::run(&client, &tickers, &cli.measurement, format, &mut out).await?;
    out.flush().map_err(StockDataError::from)?;
    Ok(summary)
}

fn open_cache(cli: &Cli) -> Result<Box<dyn ResponseCache>> {
    if cli.no_cache {
        return Ok(Box::new(MemoryCache::new(CACHE_TTL)));
    }
    let dir = match &cli.cache_dir {
        Some(dir) => dir.clone(),
        None => FileCache::default_dir()?,
    };
    let cache = FileCache::open(&dir)
        .with_context(|| format!("opening response cache at {}", dir.display()))?;
    tracing::debug!(
        "Caching responses in {} for {:?}",
        cache.dir().display(),
        CACHE_TTL
    );
    Ok(Box::new(cache))
}

/// Maps an error to the process exit code of its [`StockDataError`] kind.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StockDataError>())
        .map(StockDataError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
