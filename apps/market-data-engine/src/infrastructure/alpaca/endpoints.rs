//! Endpoint URL construction for the Alpaca data and trading APIs.
//!
//! Pure string assembly: no I/O, no side effects. Every URL is absolute and
//! fully assembled before a request is issued.

use chrono::{DateTime, Utc};

use crate::domain::Timeframe;

use super::config::AlpacaConfig;

/// The single fixed UTC format used for every instant serialized into a URL.
/// Inconsistency here breaks provider-side range filtering.
pub const URL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Page-size limit requested on every historical query.
pub const PAGE_LIMIT: u32 = 10_000;

/// Format an instant for use in an endpoint URL.
#[must_use]
pub fn url_instant(instant: DateTime<Utc>) -> String {
    instant.format(URL_DATE_FORMAT).to_string()
}

/// Builds fully-qualified endpoint URLs from the configured base URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    data_base_url: String,
    trading_base_url: String,
}

impl Endpoints {
    /// Build from a config's base URLs.
    #[must_use]
    pub fn new(config: &AlpacaConfig) -> Self {
        Self {
            data_base_url: format!("{}/v2/stocks", config.data_base_url()),
            trading_base_url: config.trading_base_url().to_string(),
        }
    }

    /// Latest-data endpoint for a query kind ("bars", "quotes", "trades",
    /// "snapshots").
    ///
    /// The endpoint form changes with the number of symbols: a single symbol
    /// is embedded in the path, two or more go into a comma-joined `symbols`
    /// query parameter. This asymmetry is the provider's routing rule, not a
    /// stylistic choice.
    fn latest_url(&self, kind: &str, symbols: &[String]) -> String {
        match symbols {
            [symbol] => format!("{}/{symbol}/{kind}/latest", self.data_base_url),
            _ => format!(
                "{}/{kind}/latest?symbols={}",
                self.data_base_url,
                symbols.join(",")
            ),
        }
    }

    /// Latest bar(s) for the symbol(s).
    #[must_use]
    pub fn latest_bars(&self, symbols: &[String]) -> String {
        self.latest_url("bars", symbols)
    }

    /// Latest bid/ask quote(s) for the symbol(s).
    #[must_use]
    pub fn latest_quotes(&self, symbols: &[String]) -> String {
        self.latest_url("quotes", symbols)
    }

    /// Latest trade(s) for the symbol(s).
    #[must_use]
    pub fn latest_trades(&self, symbols: &[String]) -> String {
        self.latest_url("trades", symbols)
    }

    /// Latest snapshot(s) for the symbol(s).
    #[must_use]
    pub fn snapshots(&self, symbols: &[String]) -> String {
        self.latest_url("snapshots", symbols)
    }

    /// One page of historical bars.
    ///
    /// Mandatory parameters: symbols, timeframe, start, end, and the page
    /// size limit. The `page_token` parameter is appended only when a
    /// non-empty cursor is supplied.
    #[must_use]
    pub fn historical_bars(
        &self,
        symbols: &[String],
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> String {
        let mut url = format!(
            "{}/bars?symbols={}&timeframe={timeframe}&start={}&end={}&limit={PAGE_LIMIT}",
            self.data_base_url,
            symbols.join(","),
            url_instant(start),
            url_instant(end),
        );
        append_page_token(&mut url, page_token);
        url
    }

    /// One page of historical quotes for a single symbol (path-embedded).
    #[must_use]
    pub fn historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> String {
        let mut url = format!(
            "{}/{symbol}/quotes?start={}&end={}&limit={PAGE_LIMIT}",
            self.data_base_url,
            url_instant(start),
            url_instant(end),
        );
        append_page_token(&mut url, page_token);
        url
    }

    /// The account's trading information.
    #[must_use]
    pub fn account(&self) -> String {
        format!("{}/v2/account", self.trading_base_url)
    }

    /// The account's assets.
    #[must_use]
    pub fn assets(&self) -> String {
        format!("{}/v2/assets", self.trading_base_url)
    }
}

/// Append `&page_token=…` only when a non-empty cursor is present.
fn append_page_token(url: &mut String, page_token: Option<&str>) {
    if let Some(token) = page_token.filter(|t| !t.trim().is_empty()) {
        url.push_str("&page_token=");
        url.push_str(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::infrastructure::alpaca::config::{AlpacaEnvironment, Credentials};

    fn endpoints() -> Endpoints {
        let config = AlpacaConfig::new(
            Credentials::new("key".to_string(), "secret".to_string()),
            AlpacaEnvironment::Paper,
        );
        Endpoints::new(&config)
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2022, 1, 3, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 1, 4, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn single_symbol_uses_path_embedded_form() {
        let url = endpoints().latest_bars(&symbols(&["AAPL"]));
        assert_eq!(
            url,
            "https://data.alpaca.markets/v2/stocks/AAPL/bars/latest"
        );
    }

    #[test]
    fn multiple_symbols_use_query_parameter_form_in_input_order() {
        let url = endpoints().latest_bars(&symbols(&["MSFT", "AAPL"]));
        assert_eq!(
            url,
            "https://data.alpaca.markets/v2/stocks/bars/latest?symbols=MSFT,AAPL"
        );
    }

    #[test]
    fn latest_family_shares_one_builder() {
        let one = symbols(&["TSLA"]);
        let endpoints = endpoints();
        assert!(endpoints.latest_quotes(&one).contains("/TSLA/quotes/latest"));
        assert!(endpoints.latest_trades(&one).contains("/TSLA/trades/latest"));
        assert!(endpoints.snapshots(&one).contains("/TSLA/snapshots/latest"));
    }

    #[test]
    fn historical_bars_renders_fixed_utc_format() {
        let (start, end) = range();
        let url = endpoints().historical_bars(
            &symbols(&["AAPL", "MSFT"]),
            Timeframe::DAY,
            start,
            end,
            None,
        );
        assert_eq!(
            url,
            "https://data.alpaca.markets/v2/stocks/bars?symbols=AAPL,MSFT&timeframe=1D\
             &start=2022-01-03T09:00:00Z&end=2022-01-04T09:00:00Z&limit=10000"
        );
    }

    #[test]
    fn historical_bars_appends_exactly_one_page_token_when_cursor_present() {
        let (start, end) = range();
        let url = endpoints().historical_bars(
            &symbols(&["AAPL"]),
            Timeframe::DAY,
            start,
            end,
            Some("abc|123"),
        );
        assert_eq!(url.matches("page_token").count(), 1);
        assert!(url.ends_with("&page_token=abc|123"));
    }

    #[test]
    fn historical_bars_omits_empty_cursor() {
        let (start, end) = range();
        let url =
            endpoints().historical_bars(&symbols(&["AAPL"]), Timeframe::DAY, start, end, Some(""));
        assert!(!url.contains("page_token"));
    }

    #[test]
    fn historical_quotes_embeds_symbol_in_path() {
        let (start, end) = range();
        let url = endpoints().historical_quotes("AAPL", start, end, Some("tok-2"));
        assert_eq!(
            url,
            "https://data.alpaca.markets/v2/stocks/AAPL/quotes?start=2022-01-03T09:00:00Z\
             &end=2022-01-04T09:00:00Z&limit=10000&page_token=tok-2"
        );
    }

    #[test]
    fn trading_endpoints() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.account(),
            "https://paper-api.alpaca.markets/v2/account"
        );
        assert_eq!(
            endpoints.assets(),
            "https://paper-api.alpaca.markets/v2/assets"
        );
    }
}
