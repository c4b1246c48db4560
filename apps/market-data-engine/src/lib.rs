// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Market Data Engine - Rust Core Library
//!
//! Paginated retrieval and persistence of stock market data from the Alpaca
//! REST API.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: market-data records with no external dependencies
//!   - `bar`, `quote`: Bars, Quotes, QuotePairs
//!   - `timeframe`: validated bar-granularity tokens
//!   - `page`: one page of a cursor-paginated result
//!
//! - **Application**: port definitions for external collaborators
//!   - `ports`: `DataTransport` (HTTP boundary), `BarStorePort` (storage
//!     boundary)
//!
//! - **Infrastructure**: adapters (implementations)
//!   - `alpaca`: endpoint builder, authenticated transport, response parser,
//!     paginating client
//!   - `persistence`: PostgreSQL and in-memory bar stores
//!
//! # Pagination
//!
//! Historical queries walk the provider's cursor protocol: each page's URL
//! depends on the previous page's cursor, and an empty/missing cursor is the
//! sole termination signal. Records are concatenated in fetch order, never
//! reordered or deduplicated - dedup is the store's job at the
//! `(symbol, timestamp)` key.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - market-data records with no external dependencies.
pub mod domain;

/// Application layer - port definitions.
pub mod application;

/// Infrastructure layer - adapters and external integrations.
pub mod infrastructure;

// Domain re-exports
pub use domain::{Bar, Page, Quote, QuotePair, QuoteSide, Timeframe, TimeframeError};

// Port re-exports
pub use application::ports::{BarStorePort, DataTransport, StoreError, TransportError};

// Infrastructure re-exports
pub use infrastructure::alpaca::{
    AlpacaConfig, AlpacaEnvironment, AlpacaHttpClient, Credentials, Endpoints, MarketDataClient,
    MarketDataError, ParseError, MAX_PAGES, PAGE_LIMIT, URL_DATE_FORMAT,
};
pub use infrastructure::persistence::{InMemoryBarStore, PostgresBarStore};
