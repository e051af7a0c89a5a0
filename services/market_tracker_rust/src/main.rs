use anyhow::Result;
use dotenv::dotenv;
use log::info;
use market_tracker_rust::server::{self, AppState};
use market_tracker_rust::{BestOfferPoller, SaleIngestor, TrackerConfig};
use orewatch_rust_core::clients::{AuctionApi, DonutClient};
use orewatch_rust_core::{MarketHistory, MarketRegistry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Starting market_tracker_rust...");

    let config = TrackerConfig::from_env()?;
    let registry = MarketRegistry::new(config.markets.clone());
    let history = MarketHistory::new(&registry);
    let api: Arc<dyn AuctionApi> = Arc::new(DonutClient::new(
        &config.api_base_url,
        &config.api_key,
        config.request_timeout,
    )?);

    info!("Tracking {} market(s): {:?}", registry.len(), registry.items());

    let poller = BestOfferPoller::new(
        Arc::clone(&api),
        registry.clone(),
        history.clone(),
        config.poll_interval,
    );
    let ingestor = SaleIngestor::new(
        Arc::clone(&api),
        registry.clone(),
        history.clone(),
        config.poll_interval,
    );

    tokio::spawn(poller.run());
    tokio::spawn(ingestor.run());

    let state = Arc::new(AppState { registry, history });
    server::serve(state, config.listen_port).await
}
