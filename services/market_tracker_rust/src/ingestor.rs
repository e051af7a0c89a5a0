//! Recent-sale ingestion job.
//!
//! Reads the global recent-transactions feed once per tracked item per
//! cycle, keeps the single-unit sales of that item, and appends the ones
//! not seen before. Only the first page is consulted, so sales that scroll
//! past it between two cycles are missed (known limitation).

use log::{debug, info, warn};
use orewatch_rust_core::clients::{AuctionApi, TransactionPage};
use orewatch_rust_core::{MarketHistory, MarketRegistry, SaleEvent};
use std::sync::Arc;
use std::time::Duration;

pub struct SaleIngestor {
    api: Arc<dyn AuctionApi>,
    registry: MarketRegistry,
    history: MarketHistory,
    poll_interval: Duration,
}

impl SaleIngestor {
    pub fn new(
        api: Arc<dyn AuctionApi>,
        registry: MarketRegistry,
        history: MarketHistory,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            registry,
            history,
            poll_interval,
        }
    }

    /// Run the ingestion loop forever, one full pass per interval.
    pub async fn run(self) {
        info!(
            "Starting sale ingestor ({} items, {}s interval)",
            self.registry.len(),
            self.poll_interval.as_secs()
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One pass over every tracked item, in registry order. Fetch failures
    /// skip the item for this cycle and never abort the rest of the pass.
    pub async fn run_cycle(&self) {
        for item in self.registry.items() {
            match self.api.fetch_recent_transactions(1).await {
                Ok(page) => {
                    let sales = single_unit_sales(&page, item);
                    let appended = self.history.record_sales(item, &sales).await;
                    if appended > 0 {
                        info!("Recorded {} new {} sale(s)", appended, item);
                    } else {
                        debug!("No new {} sales this cycle", item);
                    }
                }
                Err(e) => {
                    warn!("Transaction fetch failed for {}: {}", item, e);
                }
            }
        }
    }
}

/// Completed single-unit sales of `item` from one transaction page.
/// Entries missing a price or a sale timestamp are malformed and dropped.
fn single_unit_sales(page: &TransactionPage, item: &str) -> Vec<SaleEvent> {
    let wanted = format!("minecraft:{}", item);
    page.result
        .iter()
        .filter_map(|entry| {
            let stack = entry.item.as_ref()?;
            if stack.id != wanted || stack.count != 1 {
                return None;
            }
            Some(SaleEvent {
                price: entry.price?,
                time: entry.unix_millis_date_sold?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use orewatch_rust_core::clients::{
        GatewayError, ItemStack, ListingPage, TransactionEntry,
    };

    fn sale(id: &str, count: u32, price: Option<f64>, time: Option<i64>) -> TransactionEntry {
        TransactionEntry {
            item: Some(ItemStack {
                id: id.to_string(),
                count,
            }),
            price,
            unix_millis_date_sold: time,
        }
    }

    /// Gateway that serves the same transaction page on every call.
    struct FixedPageApi {
        page: Vec<TransactionEntry>,
    }

    #[async_trait]
    impl AuctionApi for FixedPageApi {
        async fn fetch_lowest_listing(&self, _item: &str) -> Result<ListingPage, GatewayError> {
            Err(GatewayError::EmptyResponse)
        }

        async fn fetch_recent_transactions(
            &self,
            _page: u32,
        ) -> Result<TransactionPage, GatewayError> {
            Ok(TransactionPage {
                result: self.page.clone(),
            })
        }
    }

    fn ingestor(page: Vec<TransactionEntry>) -> SaleIngestor {
        let registry = MarketRegistry::new(vec!["diamond".to_string()]);
        let history = MarketHistory::new(&registry);
        SaleIngestor::new(
            Arc::new(FixedPageApi { page }),
            registry,
            history,
            Duration::from_secs(2),
        )
    }

    #[test]
    fn test_filter_keeps_single_unit_sales_of_item() {
        let page = TransactionPage {
            result: vec![
                sale("minecraft:diamond", 1, Some(400.0), Some(1000)),
                sale("minecraft:diamond", 64, Some(9000.0), Some(2000)),
                sale("minecraft:dirt", 1, Some(1.0), Some(3000)),
            ],
        };
        let sales = single_unit_sales(&page, "diamond");
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0], SaleEvent { price: 400.0, time: 1000 });
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let page = TransactionPage {
            result: vec![
                // Missing price.
                sale("minecraft:diamond", 1, None, Some(1000)),
                // Missing sale timestamp.
                sale("minecraft:diamond", 1, Some(400.0), None),
                // Missing item payload entirely.
                TransactionEntry {
                    item: None,
                    price: Some(400.0),
                    unix_millis_date_sold: Some(2000),
                },
            ],
        };
        assert!(single_unit_sales(&page, "diamond").is_empty());
    }

    #[tokio::test]
    async fn test_repeated_ingestion_records_once() {
        let ingestor = ingestor(vec![sale("minecraft:diamond", 1, Some(400.0), Some(1000))]);

        ingestor.run_cycle().await;
        ingestor.run_cycle().await;

        let sales = ingestor.history.sale_snapshot("diamond").await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0], SaleEvent { price: 400.0, time: 1000 });
    }

    #[tokio::test]
    async fn test_missing_price_produces_no_event() {
        let ingestor = ingestor(vec![sale("minecraft:diamond", 1, None, Some(1000))]);

        ingestor.run_cycle().await;

        assert!(ingestor.history.sale_snapshot("diamond").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_new_sales_accumulate_across_cycles() {
        let registry = MarketRegistry::new(vec!["diamond".to_string()]);
        let history = MarketHistory::new(&registry);

        let first = SaleIngestor::new(
            Arc::new(FixedPageApi {
                page: vec![sale("minecraft:diamond", 1, Some(400.0), Some(1000))],
            }),
            registry.clone(),
            history.clone(),
            Duration::from_secs(2),
        );
        first.run_cycle().await;

        // Next cycle the feed has rolled forward: old sale still on the
        // page plus a fresh one.
        let second = SaleIngestor::new(
            Arc::new(FixedPageApi {
                page: vec![
                    sale("minecraft:diamond", 1, Some(410.0), Some(2000)),
                    sale("minecraft:diamond", 1, Some(400.0), Some(1000)),
                ],
            }),
            registry,
            history.clone(),
            Duration::from_secs(2),
        );
        second.run_cycle().await;

        let sales = history.sale_snapshot("diamond").await.unwrap();
        assert_eq!(sales.len(), 2);
        // Discovery order, not time order.
        assert_eq!(sales[0].time, 1000);
        assert_eq!(sales[1].time, 2000);
    }
}
