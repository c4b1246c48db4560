//! Response parsing: raw body text into domain records.
//!
//! Two failure modes, deliberately kept apart: a missing expected root field
//! is tolerant-empty (no data yet for this symbol → empty result), while
//! malformed JSON or a present-but-mistyped root is an explicit
//! [`ParseError`]. Callers rely on the distinction to avoid special-casing
//! "no data" as a failure.

use crate::domain::{Bar, Page, QuotePair};

use super::api_types::{
    HistoricalBarsResponse, HistoricalQuotesResponse, LatestBarsResponse, LatestQuotesResponse,
};
use super::error::ParseError;

/// Parse a latest-bars body: one bar per symbol, symbol injected from the
/// map key.
pub fn parse_latest_bars(body: &str) -> Result<Vec<Bar>, ParseError> {
    let response: LatestBarsResponse = serde_json::from_str(body)?;
    let Some(bars) = response.bars else {
        return Ok(Vec::new());
    };
    Ok(bars
        .into_iter()
        .map(|(symbol, raw)| raw.into_bar(&symbol))
        .collect())
}

/// Parse one historical-bars page: every bar in every per-symbol list is
/// tagged with that list's symbol key. A missing root clears the cursor too.
pub fn parse_historical_bars(body: &str) -> Result<Page<Bar>, ParseError> {
    let response: HistoricalBarsResponse = serde_json::from_str(body)?;
    let Some(symbol_bars) = response.bars else {
        return Ok(Page::new(Vec::new(), None));
    };
    let mut records = Vec::new();
    for (symbol, bars) in symbol_bars {
        records.extend(bars.into_iter().map(|raw| raw.into_bar(&symbol)));
    }
    Ok(Page::new(records, response.next_page_token))
}

/// Parse a latest-quotes body: one paired observation per symbol.
pub fn parse_latest_quotes(body: &str) -> Result<Vec<QuotePair>, ParseError> {
    let response: LatestQuotesResponse = serde_json::from_str(body)?;
    let Some(quotes) = response.quotes else {
        return Ok(Vec::new());
    };
    Ok(quotes
        .into_iter()
        .map(|(symbol, raw)| raw.into_quote_pair(&symbol))
        .collect())
}

/// Parse one historical-quotes page: all observations share the
/// response-level symbol. Missing root or missing symbol is tolerant-empty.
pub fn parse_historical_quotes(body: &str) -> Result<Page<QuotePair>, ParseError> {
    let response: HistoricalQuotesResponse = serde_json::from_str(body)?;
    let (Some(symbol), Some(quotes)) = (response.symbol, response.quotes) else {
        return Ok(Page::new(Vec::new(), None));
    };
    let records = quotes
        .into_iter()
        .map(|raw| raw.into_quote_pair(&symbol))
        .collect();
    Ok(Page::new(records, response.next_page_token))
}
