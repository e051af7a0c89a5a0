//! market_tracker_rust - auction house price tracking service
//!
//! Two periodic jobs sample the auction house API for a fixed set of items
//! (best single-unit offer, recent single-unit sales) and append into the
//! shared in-memory histories, which a small read-only HTTP interface
//! serves to clients.

pub mod config;
pub mod ingestor;
pub mod poller;
pub mod server;

pub use config::TrackerConfig;
pub use ingestor::SaleIngestor;
pub use poller::BestOfferPoller;
