//! Best-offer polling job.
//!
//! Samples the cheapest single-unit listing for every tracked item once per
//! cycle and appends it to the price history. Bulk lots are skipped: their
//! per-lot price is not comparable to a single-unit offer.

use chrono::Utc;
use log::{debug, info, warn};
use orewatch_rust_core::clients::{AuctionApi, ListingPage};
use orewatch_rust_core::{MarketHistory, MarketRegistry, PriceSample};
use std::sync::Arc;
use std::time::Duration;

pub struct BestOfferPoller {
    api: Arc<dyn AuctionApi>,
    registry: MarketRegistry,
    history: MarketHistory,
    poll_interval: Duration,
}

impl BestOfferPoller {
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

    /// Run the polling loop forever. A cycle never overlaps the next one:
    /// the sleep starts after the full pass finishes.
    pub async fn run(self) {
        info!(
            "Starting best-offer poller ({} items, {}s interval)",
            self.registry.len(),
            self.poll_interval.as_secs()
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One pass over every tracked item, in registry order. Items are
    /// fetched one at a time to throttle outbound request volume. A failure
    /// for one item never aborts the rest of the pass.
    pub async fn run_cycle(&self) {
        for item in self.registry.items() {
            match self.api.fetch_lowest_listing(item).await {
                Ok(page) => match best_single_unit_price(&page, item) {
                    Some(price) => {
                        let sample = PriceSample {
                            price,
                            time: Utc::now().timestamp_millis(),
                        };
                        self.history.push_price(item, sample).await;
                        info!("Logged best price for {}: ${}", item, price);
                    }
                    None => {
                        debug!("No single-unit listing for {} this cycle", item);
                    }
                },
                Err(e) => {
                    warn!("Best-offer fetch failed for {}: {}", item, e);
                }
            }
        }
    }
}

/// Price of the first listing that is exactly one unit of `item`. The API
/// returns listings cheapest first, so the first match is the best offer at
/// sampling time. Listings without a price are skipped.
fn best_single_unit_price(page: &ListingPage, item: &str) -> Option<f64> {
    let wanted = format!("minecraft:{}", item);
    page.result
        .iter()
        .filter(|entry| {
            entry
                .item
                .as_ref()
                .is_some_and(|stack| stack.id == wanted && stack.count == 1)
        })
        .find_map(|entry| entry.price)
}
