//! Alpaca API response wire types.
//!
//! These map directly to the provider's JSON field names. Wire records carry
//! no symbol of their own - the parser joins them with the enclosing map key
//! (or the shared response-level symbol) to build domain records. One
//! envelope type per query kind, each owning its own deserialization rules.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Bar, Quote, QuotePair, QuoteSide};

/// One bar object as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBar {
    /// Bucket timestamp.
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    /// Open price.
    #[serde(rename = "o")]
    pub open: Decimal,
    /// High price.
    #[serde(rename = "h")]
    pub high: Decimal,
    /// Low price.
    #[serde(rename = "l")]
    pub low: Decimal,
    /// Close price.
    #[serde(rename = "c")]
    pub close: Decimal,
    /// Share volume.
    #[serde(rename = "v", default)]
    pub volume: i64,
    /// Trade count. Omitted on some feeds.
    #[serde(rename = "n", default)]
    pub trade_count: i32,
    /// Volume-weighted average price. Omitted on some feeds.
    #[serde(rename = "vw", default)]
    pub vwap: Decimal,
}

impl RawBar {
    /// Attach the symbol the parser recovered from the response envelope.
    #[must_use]
    pub fn into_bar(self, symbol: &str) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: self.timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            trade_count: self.trade_count,
            vwap: self.vwap,
        }
    }
}

/// One quote observation as it appears on the wire: up to 8 fields covering
/// the timestamp and both sides. Any side field may be null or missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    /// Observation timestamp.
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    /// Ask exchange code. Emptiness is the authoritative absence signal.
    #[serde(rename = "ax", default)]
    pub ask_exchange: Option<String>,
    /// Ask price.
    #[serde(rename = "ap", default)]
    pub ask_price: Option<Decimal>,
    /// Ask size.
    #[serde(rename = "as", default)]
    pub ask_size: Option<f64>,
    /// Bid exchange code.
    #[serde(rename = "bx", default)]
    pub bid_exchange: Option<String>,
    /// Bid price.
    #[serde(rename = "bp", default)]
    pub bid_price: Option<Decimal>,
    /// Bid size.
    #[serde(rename = "bs", default)]
    pub bid_size: Option<f64>,
}

impl RawQuote {
    /// Build the paired observation for `symbol`, applying the missing-side
    /// rule to each side independently.
    #[must_use]
    pub fn into_quote_pair(self, symbol: &str) -> QuotePair {
        QuotePair {
            symbol: symbol.to_string(),
            ask: Quote::from_optional_side(
                self.timestamp,
                QuoteSide::Ask,
                self.ask_exchange.as_deref(),
                self.ask_price,
                self.ask_size,
            ),
            bid: Quote::from_optional_side(
                self.timestamp,
                QuoteSide::Bid,
                self.bid_exchange.as_deref(),
                self.bid_price,
                self.bid_size,
            ),
        }
    }
}

/// Latest-bars envelope: one bar per symbol.
#[derive(Debug, Deserialize)]
pub struct LatestBarsResponse {
    /// Map from symbol to its latest bar. Absent when no data yet.
    #[serde(default)]
    pub bars: Option<HashMap<String, RawBar>>,
}

/// Historical-bars envelope: a list of bars per symbol plus a cursor.
#[derive(Debug, Deserialize)]
pub struct HistoricalBarsResponse {
    /// Map from symbol to its bars, in provider order. Absent when no data.
    #[serde(default)]
    pub bars: Option<HashMap<String, Vec<RawBar>>>,
    /// Cursor for the next page; null or missing on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Latest-quotes envelope: one observation per symbol.
#[derive(Debug, Deserialize)]
pub struct LatestQuotesResponse {
    /// Map from symbol to its latest observation. Absent when no data yet.
    #[serde(default)]
    pub quotes: Option<HashMap<String, RawQuote>>,
}

/// Historical-quotes envelope: one symbol shared by all observations.
#[derive(Debug, Deserialize)]
pub struct HistoricalQuotesResponse {
    /// The symbol all observations belong to.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Observations in provider order. Absent when no data.
    #[serde(default)]
    pub quotes: Option<Vec<RawQuote>>,
    /// Cursor for the next page; null or missing on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}
