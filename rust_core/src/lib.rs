//! Orewatch Core - shared pieces of the auction price tracker.
//!
//! This crate provides:
//! - Typed client for the auction house API (listings and transactions)
//! - The static registry of tracked market items
//! - In-memory append-only price and sale histories with snapshot reads

pub mod clients;
pub mod history;
pub mod registry;
mod types;

pub use history::MarketHistory;
pub use registry::MarketRegistry;
pub use types::{PriceSample, SaleEvent};
