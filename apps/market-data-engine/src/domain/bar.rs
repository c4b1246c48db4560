//! Price bar domain record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated OHLCV statistics for one symbol over one fixed time bucket.
///
/// The identity key is `(symbol, timestamp)` - unique per provider guarantee.
/// The symbol is never present in the raw per-bar JSON; the response parser
/// injects it from the enclosing map key (or the shared response-level symbol
/// field) when the bar is constructed. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Stock ticker symbol, assigned during parsing.
    pub symbol: String,
    /// Start of the time bucket this bar aggregates.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Highest traded price.
    pub high: Decimal,
    /// Lowest traded price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Total traded share volume.
    pub volume: i64,
    /// Number of trades in the bucket.
    pub trade_count: i32,
    /// Volume-weighted average price.
    pub vwap: Decimal,
}

impl Bar {
    /// The `(symbol, timestamp)` identity key.
    #[must_use]
    pub fn key(&self) -> (&str, DateTime<Utc>) {
        (&self.symbol, self.timestamp)
    }
}
