//! PostgreSQL bar store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::application::ports::{BarStorePort, StoreError};
use crate::domain::Bar;

/// Insert one bar; a `(symbol, timestamp)` conflict keeps the existing row.
const INSERT_BAR: &str = r"
    INSERT INTO bars (symbol, timestamp, open, high, low, close, volume, trade_count, vwap)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    ON CONFLICT (symbol, timestamp) DO NOTHING
";

/// Bars for one symbol in a closed timestamp interval, ascending.
const GET_BARS_BY_SYMBOL: &str = r"
    SELECT symbol, timestamp, open, high, low, close, volume, trade_count, vwap
    FROM bars
    WHERE symbol = $1 AND timestamp BETWEEN $2 AND $3
    ORDER BY timestamp
";

const CREATE_BARS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bars (
        id BIGSERIAL PRIMARY KEY,
        symbol VARCHAR(10) NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        open DECIMAL(18, 6) NOT NULL,
        high DECIMAL(18, 6) NOT NULL,
        low DECIMAL(18, 6) NOT NULL,
        close DECIMAL(18, 6) NOT NULL,
        volume BIGINT NOT NULL,
        trade_count INTEGER NOT NULL,
        vwap DECIMAL(18, 6) NOT NULL,
        UNIQUE (symbol, timestamp)
    )
";

const CREATE_BARS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_bars_symbol_timestamp
    ON bars (symbol, timestamp)
";

/// Bar store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PostgresBarStore {
    pool: PgPool,
}

impl PostgresBarStore {
    /// Connect with the default pool size.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        Self::with_max_connections(database_url, 5).await
    }

    /// Connect with a custom pool size.
    pub async fn with_max_connections(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(max_connections, "PostgreSQL connection pool initialized");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing).
    #[must_use]
    pub const fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the bars table and its range-query index if they don't exist.
    /// Called once at startup.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_BARS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        sqlx::query(CREATE_BARS_INDEX)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        info!("Database schema initialized");
        Ok(())
    }

    /// Whether the database answers a trivial query.
    pub async fn is_connected(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn row_to_bar(row: &sqlx::postgres::PgRow) -> Result<Bar, StoreError> {
        let field = |name: &str, e: sqlx::Error| StoreError::Query(format!("{name}: {e}"));
        Ok(Bar {
            symbol: row
                .try_get::<String, _>("symbol")
                .map_err(|e| field("symbol", e))?,
            timestamp: row
                .try_get::<DateTime<Utc>, _>("timestamp")
                .map_err(|e| field("timestamp", e))?,
            open: row
                .try_get::<Decimal, _>("open")
                .map_err(|e| field("open", e))?,
            high: row
                .try_get::<Decimal, _>("high")
                .map_err(|e| field("high", e))?,
            low: row
                .try_get::<Decimal, _>("low")
                .map_err(|e| field("low", e))?,
            close: row
                .try_get::<Decimal, _>("close")
                .map_err(|e| field("close", e))?,
            volume: row
                .try_get::<i64, _>("volume")
                .map_err(|e| field("volume", e))?,
            trade_count: row
                .try_get::<i32, _>("trade_count")
                .map_err(|e| field("trade_count", e))?,
            vwap: row
                .try_get::<Decimal, _>("vwap")
                .map_err(|e| field("vwap", e))?,
        })
    }
}

#[async_trait]
impl BarStorePort for PostgresBarStore {
    async fn upsert_bar(&self, bar: &Bar) -> Result<(), StoreError> {
        sqlx::query(INSERT_BAR)
            .bind(&bar.symbol)
            .bind(bar.timestamp)
            .bind(bar.open)
            .bind(bar.high)
            .bind(bar.low)
            .bind(bar.close)
            .bind(bar.volume)
            .bind(bar.trade_count)
            .bind(bar.vwap)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        debug!(symbol = %bar.symbol, timestamp = %bar.timestamp, "Bar upserted");
        Ok(())
    }

    async fn bars_by_symbol(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, StoreError> {
        let rows = sqlx::query(GET_BARS_BY_SYMBOL)
            .bind(symbol)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.iter().map(Self::row_to_bar).collect()
    }
}
