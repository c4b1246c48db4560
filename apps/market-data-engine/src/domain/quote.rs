//! Quote observations: single-side quotes and paired bid/ask observations.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The side of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSide {
    /// Offer to sell.
    Ask,
    /// Offer to buy.
    Bid,
}

impl QuoteSide {
    /// Lowercase wire/display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Bid => "bid",
        }
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bid or ask price/size observation at an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The instant the quote was observed.
    pub timestamp: DateTime<Utc>,
    /// Which side of the book this quote is on.
    pub side: QuoteSide,
    /// Exchange code the quote originated from, e.g. "N" (NYSE), "V" (IEX).
    pub exchange: String,
    /// Quoted price. A price of exactly 0 is a valid quote.
    pub price: Decimal,
    /// Quoted size in shares.
    pub size: f64,
}

impl Quote {
    /// Construct one side of a quote observation from optional wire fields.
    ///
    /// The exchange code is the authoritative presence signal: a null, empty,
    /// or whitespace-only exchange code means the side was not quoted at this
    /// instant and `None` is returned, regardless of what the price and size
    /// fields carry. When the exchange code is non-empty, a null price or
    /// size defaults to 0 - the side is present but the provider omitted a
    /// sub-field.
    #[must_use]
    pub fn from_optional_side(
        timestamp: DateTime<Utc>,
        side: QuoteSide,
        exchange: Option<&str>,
        price: Option<Decimal>,
        size: Option<f64>,
    ) -> Option<Self> {
        let exchange = exchange.map(str::trim).filter(|code| !code.is_empty())?;
        Some(Self {
            timestamp,
            side,
            exchange: exchange.to_string(),
            price: price.unwrap_or_default(),
            size: size.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} shares for ${} ea. via {}",
            self.side.as_str().to_uppercase(),
            self.size,
            self.price,
            self.exchange
        )
    }
}

/// The paired best-bid/best-ask observation for a symbol at one instant.
///
/// Either side may be legitimately absent: the provider omits the exchange
/// code for a side that was not quoted at that timestamp. Absence is distinct
/// from a zero-valued quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotePair {
    /// Stock ticker symbol, assigned during parsing.
    pub symbol: String,
    /// The ask-side quote, if the ask was quoted at this instant.
    pub ask: Option<Quote>,
    /// The bid-side quote, if the bid was quoted at this instant.
    pub bid: Option<Quote>,
}

impl fmt::Display for QuotePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |quote: &Option<Quote>| {
            quote
                .as_ref()
                .map_or_else(|| "None".to_string(), ToString::to_string)
        };
        write!(
            f,
            "Quotes for {}: {} / {}",
            self.symbol,
            side(&self.ask),
            side(&self.bid)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 3, 14, 30, 0).unwrap()
    }

    #[test]
    fn empty_exchange_code_means_side_absent() {
        let quote = Quote::from_optional_side(
            instant(),
            QuoteSide::Ask,
            Some(""),
            Some(dec!(150.25)),
            Some(3.0),
        );
        assert!(quote.is_none());
    }

    #[test]
    fn whitespace_exchange_code_means_side_absent() {
        let quote =
            Quote::from_optional_side(instant(), QuoteSide::Bid, Some("  "), Some(dec!(1)), None);
        assert!(quote.is_none());
    }

    #[test]
    fn missing_exchange_code_means_side_absent() {
        let quote = Quote::from_optional_side(instant(), QuoteSide::Ask, None, None, None);
        assert!(quote.is_none());
    }

    #[test]
    fn zero_price_with_exchange_code_is_a_valid_quote() {
        let quote =
            Quote::from_optional_side(instant(), QuoteSide::Bid, Some("V"), Some(dec!(0)), Some(1.0))
                .unwrap();
        assert_eq!(quote.price, Decimal::ZERO);
        assert_eq!(quote.exchange, "V");
    }

    #[test]
    fn null_price_and_size_default_to_zero_when_side_present() {
        let quote = Quote::from_optional_side(instant(), QuoteSide::Ask, Some("N"), None, None)
            .unwrap();
        assert_eq!(quote.price, Decimal::ZERO);
        assert_eq!(quote.size, 0.0);
    }

    #[test]
    fn quote_display_reads_like_a_ticket() {
        let quote =
            Quote::from_optional_side(instant(), QuoteSide::Ask, Some("N"), Some(dec!(150.25)), Some(2.0))
                .unwrap();
        assert_eq!(quote.to_string(), "ASK: 2 shares for $150.25 ea. via N");
    }

    #[test]
    fn pair_display_shows_missing_sides() {
        let pair = QuotePair {
            symbol: "AAPL".to_string(),
            ask: None,
            bid: Quote::from_optional_side(instant(), QuoteSide::Bid, Some("V"), Some(dec!(150)), Some(1.0)),
        };
        let rendered = pair.to_string();
        assert!(rendered.starts_with("Quotes for AAPL"));
        assert!(rendered.contains("None"));
        assert!(rendered.contains("BID"));
    }
}
