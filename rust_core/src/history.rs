//! In-memory price and sale history store.
//!
//! One append-only series per tracked item for each of the two histories.
//! Each series has a single writer (the best-offer poller for prices, the
//! sale ingestor for sales) and any number of concurrent readers. Readers
//! get cloned snapshots taken under the read lock, so a snapshot never
//! aliases a series that is still being appended to.
//!
//! Nothing is ever removed; unbounded growth over the process lifetime is
//! an accepted limitation.

use crate::registry::MarketRegistry;
use crate::types::{PriceSample, SaleEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to both histories. Cheap to clone.
#[derive(Clone)]
pub struct MarketHistory {
    prices: Arc<RwLock<HashMap<String, Vec<PriceSample>>>>,
    sales: Arc<RwLock<HashMap<String, Vec<SaleEvent>>>>,
}

impl MarketHistory {
    /// Create empty histories for every item in the registry.
    pub fn new(registry: &MarketRegistry) -> Self {
        let mut prices = HashMap::new();
        let mut sales = HashMap::new();
        for item in registry.items() {
            prices.insert(item.clone(), Vec::new());
            sales.insert(item.clone(), Vec::new());
        }
        Self {
            prices: Arc::new(RwLock::new(prices)),
            sales: Arc::new(RwLock::new(sales)),
        }
    }

    /// Append one best-offer sample. Untracked items are ignored.
    pub async fn push_price(&self, item: &str, sample: PriceSample) {
        let mut prices = self.prices.write().await;
        if let Some(series) = prices.get_mut(item) {
            series.push(sample);
        }
    }

    /// Append the sale events whose `time` is not already recorded for this
    /// item. Returns how many events were actually appended.
    ///
    /// Insertion order is discovery order, not sale-time order, so the
    /// dedup check scans the whole existing series rather than assuming it
    /// is sorted.
    pub async fn record_sales(&self, item: &str, events: &[SaleEvent]) -> usize {
        let mut sales = self.sales.write().await;
        let Some(series) = sales.get_mut(item) else {
            return 0;
        };
        let mut appended = 0;
        for event in events {
            if !series.iter().any(|existing| existing.time == event.time) {
                series.push(*event);
                appended += 1;
            }
        }
        appended
    }

    /// Snapshot of an item's price history, oldest first. `None` for items
    /// not in the registry.
    pub async fn price_snapshot(&self, item: &str) -> Option<Vec<PriceSample>> {
        self.prices.read().await.get(item).cloned()
    }

    /// Snapshot of an item's sale history, in discovery order. `None` for
    /// items not in the registry.
    pub async fn sale_snapshot(&self, item: &str) -> Option<Vec<SaleEvent>> {
        self.sales.read().await.get(item).cloned()
    }
}
