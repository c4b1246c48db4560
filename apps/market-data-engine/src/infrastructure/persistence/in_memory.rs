//! In-memory bar store for testing and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{BarStorePort, StoreError};
use crate::domain::Bar;

/// In-memory implementation of [`BarStorePort`].
///
/// Honors the same conflict rule as the relational store: the first write for
/// a `(symbol, timestamp)` key wins and later writes for the key are silent
/// no-ops. Suitable for testing and development, not production.
#[derive(Debug, Default)]
pub struct InMemoryBarStore {
    bars: RwLock<HashMap<(String, DateTime<Utc>), Bar>>,
}

impl InMemoryBarStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bars: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.read().unwrap().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.read().unwrap().is_empty()
    }

    /// Remove all bars.
    pub fn clear(&self) {
        self.bars.write().unwrap().clear();
    }
}

#[async_trait]
impl BarStorePort for InMemoryBarStore {
    async fn upsert_bar(&self, bar: &Bar) -> Result<(), StoreError> {
        let mut bars = self.bars.write().unwrap();
        bars.entry((bar.symbol.clone(), bar.timestamp))
            .or_insert_with(|| bar.clone());
        Ok(())
    }

    async fn bars_by_symbol(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, StoreError> {
        let bars = self.bars.read().unwrap();
        let mut matching: Vec<Bar> = bars
            .values()
            .filter(|bar| bar.symbol == symbol && bar.timestamp >= start && bar.timestamp <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|bar| bar.timestamp);
        Ok(matching)
    }
}
