//! Market Data Engine Binary
//!
//! Backfills historical bars into PostgreSQL and logs the latest quotes for
//! the configured symbols.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-data-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `ALPACA_KEY`: Data API key
//! - `ALPACA_SECRET`: Data API secret
//! - `DATABASE_URL`: PostgreSQL connection string
//!
//! ## Optional
//! - `MARKET_DATA_ENV`: PAPER | LIVE (default: PAPER)
//! - `BACKFILL_SYMBOLS`: Comma-joined ticker symbols (default: AAPL)
//! - `BACKFILL_TIMEFRAME`: Bar granularity token, e.g. 15T, 1H, 1D
//!   (default: 1D)
//! - `BACKFILL_DAYS`: How many days back the window starts (default: 7)
//! - `RUST_LOG`: Log level (default: info)

use chrono::{Duration, Utc};

use market_data_engine::{
    AlpacaConfig, AlpacaEnvironment, BarStorePort, Credentials, MarketDataClient,
    PostgresBarStore, Timeframe,
};

/// Parsed configuration from environment variables.
struct EngineConfig {
    environment: AlpacaEnvironment,
    credentials: Credentials,
    database_url: String,
    symbols: Vec<String>,
    timeframe: Timeframe,
    backfill_days: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting market data engine");

    let config = parse_config()?;
    log_config(&config);

    let store = PostgresBarStore::connect(&config.database_url).await?;
    store.init_schema().await?;

    let alpaca_config =
        AlpacaConfig::new(config.credentials.clone(), config.environment);
    let client = MarketDataClient::from_config(&alpaca_config)?;

    let end = Utc::now();
    let start = end - Duration::days(config.backfill_days);

    let bars = client
        .historical_bars(&config.symbols, config.timeframe, start, end)
        .await?;
    tracing::info!(bars = bars.len(), "Historical bars fetched");

    store.upsert_bars(&bars).await?;
    tracing::info!(bars = bars.len(), "Historical bars persisted");

    let quotes = client.latest_quotes(&config.symbols).await?;
    for quote in &quotes {
        tracing::info!(%quote, "Latest quote");
    }

    tracing::info!("Market data engine done");
    Ok(())
}

/// Load .env file if present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant guaranteed
/// to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "market_data_engine=info"
                    .parse()
                    .expect("static directive 'market_data_engine=info' is valid"),
            ),
        )
        .init();
}

/// Parse configuration from environment variables.
fn parse_config() -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let environment = AlpacaEnvironment::from_str_case_insensitive(
        &std::env::var("MARKET_DATA_ENV").unwrap_or_else(|_| "PAPER".to_string()),
    );

    let api_key = std::env::var("ALPACA_KEY").unwrap_or_default();
    let api_secret = std::env::var("ALPACA_SECRET").unwrap_or_default();
    let credentials = Credentials::new(api_key, api_secret);
    if credentials.is_incomplete() {
        return Err("ALPACA_KEY and ALPACA_SECRET environment variables are required".into());
    }

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable is required")?;

    let symbols: Vec<String> = std::env::var("BACKFILL_SYMBOLS")
        .unwrap_or_else(|_| "AAPL".to_string())
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err("BACKFILL_SYMBOLS must name at least one symbol".into());
    }

    let timeframe: Timeframe = std::env::var("BACKFILL_TIMEFRAME")
        .unwrap_or_else(|_| "1D".to_string())
        .parse()?;

    let backfill_days: i64 = std::env::var("BACKFILL_DAYS")
        .unwrap_or_else(|_| "7".to_string())
        .parse()
        .unwrap_or(7);

    Ok(EngineConfig {
        environment,
        credentials,
        database_url,
        symbols,
        timeframe,
        backfill_days,
    })
}

/// Log the parsed configuration.
fn log_config(config: &EngineConfig) {
    tracing::info!(
        environment = %config.environment,
        symbols = ?config.symbols,
        timeframe = %config.timeframe,
        backfill_days = config.backfill_days,
        "Configuration loaded"
    );
}
