//! Paginating market-data client.
//!
//! Composes endpoint builder → transport → parser. Historical queries walk
//! the provider's cursor protocol to exhaustion: each page's URL depends on
//! the previous page's cursor, so a walk is inherently sequential - one
//! request in flight at a time. Independent walks share no mutable state and
//! may run concurrently.

use chrono::{DateTime, Utc};

use crate::application::ports::DataTransport;
use crate::domain::{Bar, Page, QuotePair, Timeframe};

use super::config::AlpacaConfig;
use super::endpoints::Endpoints;
use super::error::MarketDataError;
use super::http_client::AlpacaHttpClient;
use super::response;

/// Defensive cap on pages per walk. The provider's cursor should terminate
/// long before this; hitting the cap is reported as an error rather than
/// looping forever on a non-terminating cursor.
pub const MAX_PAGES: u32 = 10_000;

/// Market-data client over any transport.
#[derive(Debug, Clone)]
pub struct MarketDataClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl MarketDataClient<AlpacaHttpClient> {
    /// Build a client over the real HTTP transport.
    pub fn from_config(config: &AlpacaConfig) -> Result<Self, MarketDataError> {
        let transport = AlpacaHttpClient::new(config)?;
        Ok(Self::new(transport, Endpoints::new(config)))
    }
}

impl<T: DataTransport> MarketDataClient<T> {
    /// Build a client from a transport and endpoint builder.
    pub const fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Latest bar per symbol. Single page; no cursor is involved.
    pub async fn latest_bars(&self, symbols: &[String]) -> Result<Vec<Bar>, MarketDataError> {
        let url = self.endpoints.latest_bars(symbols);
        let body = self.transport.get_text(&url).await?;
        Ok(response::parse_latest_bars(&body)?)
    }

    /// Latest paired quote observation per symbol.
    pub async fn latest_quotes(
        &self,
        symbols: &[String],
    ) -> Result<Vec<QuotePair>, MarketDataError> {
        let url = self.endpoints.latest_quotes(symbols);
        let body = self.transport.get_text(&url).await?;
        Ok(response::parse_latest_quotes(&body)?)
    }

    /// Fetch one page of historical bars. Callers that want page-by-page
    /// control (partial progress, their own bounds) drive the walk with this.
    pub async fn historical_bars_page(
        &self,
        symbols: &[String],
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<Page<Bar>, MarketDataError> {
        let url = self
            .endpoints
            .historical_bars(symbols, timeframe, start, end, cursor);
        let body = self.transport.get_text(&url).await?;
        Ok(response::parse_historical_bars(&body)?)
    }

    /// All historical bars for the symbols in `[start, end]`, concatenated
    /// across pages in fetch order.
    ///
    /// A failure on any page fails the whole operation; nothing fetched so
    /// far is returned.
    pub async fn historical_bars(
        &self,
        symbols: &[String],
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages: u32 = 0;

        loop {
            if pages >= MAX_PAGES {
                return Err(MarketDataError::PageLimitExceeded { pages });
            }
            let page = self
                .historical_bars_page(symbols, timeframe, start, end, cursor.as_deref())
                .await?;
            pages += 1;
            records.extend(page.records);
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(pages, records = records.len(), "historical bars walk complete");
        Ok(records)
    }

    /// Fetch one page of historical quotes for a single symbol.
    pub async fn historical_quotes_page(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cursor: Option<&str>,
    ) -> Result<Page<QuotePair>, MarketDataError> {
        let url = self.endpoints.historical_quotes(symbol, start, end, cursor);
        let body = self.transport.get_text(&url).await?;
        Ok(response::parse_historical_quotes(&body)?)
    }

    /// All historical quote observations for `symbol` in `[start, end]`,
    /// concatenated across pages in fetch order.
    pub async fn historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<QuotePair>, MarketDataError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages: u32 = 0;

        loop {
            if pages >= MAX_PAGES {
                return Err(MarketDataError::PageLimitExceeded { pages });
            }
            let page = self
                .historical_quotes_page(symbol, start, end, cursor.as_deref())
                .await?;
            pages += 1;
            records.extend(page.records);
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(
            symbol,
            pages,
            records = records.len(),
            "historical quotes walk complete"
        );
        Ok(records)
    }
}
