//! Bar store port - idempotent persistence for price bars.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Bar;

/// Errors from the storage boundary.
///
/// A duplicate-key conflict is deliberately NOT represented here: upserts
/// swallow conflicts (first write wins), so duplicates are never an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach or open the store.
    #[error("store connection error: {0}")]
    Connection(String),

    /// A statement failed to execute.
    #[error("store query error: {0}")]
    Query(String),
}

/// Persistence operations the core requires from the relational store.
#[async_trait]
pub trait BarStorePort: Send + Sync {
    /// Insert a bar, keyed by `(symbol, timestamp)`. A conflict on the key is
    /// a silent no-op: the existing row is kept.
    async fn upsert_bar(&self, bar: &Bar) -> Result<(), StoreError>;

    /// Upsert each bar in turn. Order-independent and non-transactional: a
    /// mid-batch failure leaves the bars already applied committed.
    async fn upsert_bars(&self, bars: &[Bar]) -> Result<(), StoreError> {
        for bar in bars {
            self.upsert_bar(bar).await?;
        }
        Ok(())
    }

    /// Bars for `symbol` with timestamp in the closed interval
    /// `[start, end]`, in ascending timestamp order.
    async fn bars_by_symbol(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, StoreError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    /// Store that accepts bars until it hits one for a poisoned symbol.
    struct FailingStore {
        poison_symbol: &'static str,
        applied: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BarStorePort for FailingStore {
        async fn upsert_bar(&self, bar: &Bar) -> Result<(), StoreError> {
            if bar.symbol == self.poison_symbol {
                return Err(StoreError::Query("constraint violation".to_string()));
            }
            self.applied.lock().unwrap().push(bar.symbol.clone());
            Ok(())
        }

        async fn bars_by_symbol(
            &self,
            _symbol: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<Bar>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn bar(symbol: &str) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: Utc.with_ymd_and_hms(2022, 1, 3, 9, 0, 0).unwrap(),
            open: dec!(1),
            high: dec!(2),
            low: dec!(0.5),
            close: dec!(1.5),
            volume: 10,
            trade_count: 1,
            vwap: dec!(1.2),
        }
    }

    #[tokio::test]
    async fn batch_failure_leaves_prior_upserts_committed() {
        let store = FailingStore {
            poison_symbol: "MSFT",
            applied: Mutex::new(Vec::new()),
        };
        let batch = [bar("AAPL"), bar("TSLA"), bar("MSFT"), bar("AMZN")];

        let result = store.upsert_bars(&batch).await;

        assert!(result.is_err());
        // Bars before the failure stay applied; the one after is never tried.
        assert_eq!(*store.applied.lock().unwrap(), vec!["AAPL", "TSLA"]);
    }
}
