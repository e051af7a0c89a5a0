//! Core market-tracking types

use serde::{Deserialize, Serialize};

/// One observed best-offer price for a tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: f64,
    /// Unix milliseconds at sampling time.
    pub time: i64,
}

/// One completed single-unit sale.
///
/// The upstream API has no transaction id, so `time` (the reported sale
/// timestamp in unix milliseconds) doubles as the dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub price: f64,
    pub time: i64,
}
