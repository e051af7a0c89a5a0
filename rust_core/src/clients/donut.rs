//! Auction house API client.
//!
//! Wraps the two read endpoints the tracker consumes:
//! - `POST /v1/auction/list/1` - active listings matching a search term,
//!   sorted cheapest first
//! - `GET /v1/auction/transactions/{page}` - globally recent completed
//!   transactions, newest page first
//!
//! No retry logic: a failed call is reported to the caller, which treats it
//! as "no data this cycle" and moves on.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.donutsmp.net";

/// Failure modes of the auction API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport error, non-success HTTP status, or undecodable body.
    #[error("auction API request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Well-formed response that lacks the expected `result` list.
    #[error("auction API response had no result list")]
    EmptyResponse,
}

/// Item payload embedded in listings and transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStack {
    /// Namespaced item id, e.g. `"minecraft:diamond"`.
    pub id: String,
    /// Stack size of the lot. Single-unit lots have `count == 1`.
    pub count: u32,
}

/// One active auction listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEntry {
    pub item: Option<ItemStack>,
    pub price: Option<f64>,
}

/// Page of listings returned by the search endpoint, cheapest first.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub result: Vec<ListingEntry>,
}

/// One completed transaction from the global feed.
///
/// `price` and the sale timestamp are optional on the wire; entries missing
/// either are malformed and get filtered downstream rather than failing the
/// whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub item: Option<ItemStack>,
    pub price: Option<f64>,
    #[serde(rename = "unixMillisDateSold")]
    pub unix_millis_date_sold: Option<i64>,
}

/// Page of recent transactions, not filtered by item.
#[derive(Debug, Clone)]
pub struct TransactionPage {
    pub result: Vec<TransactionEntry>,
}

#[derive(Debug, Deserialize)]
struct RawListingResponse {
    result: Option<Vec<ListingEntry>>,
}

#[derive(Debug, Deserialize)]
struct RawTransactionResponse {
    result: Option<Vec<TransactionEntry>>,
}

/// Read operations against the auction house, behind a trait so jobs can be
/// exercised against scripted data in tests.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    /// Current listings for `item`, cheapest first.
    async fn fetch_lowest_listing(&self, item: &str) -> Result<ListingPage, GatewayError>;

    /// One page of globally recent completed transactions.
    async fn fetch_recent_transactions(&self, page: u32)
        -> Result<TransactionPage, GatewayError>;
}

/// HTTP client for the auction house API.
#[derive(Clone)]
pub struct DonutClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for DonutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonutClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DonutClient {
    /// Create a new client. Every request is bounded by `timeout` so a
    /// stalled upstream cannot wedge a polling cycle.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for auction API")?;

        let base_url = if base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url.trim_end_matches('/').to_string()
        };

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl AuctionApi for DonutClient {
    async fn fetch_lowest_listing(&self, item: &str) -> Result<ListingPage, GatewayError> {
        let url = format!("{}/v1/auction/list/1", self.base_url);
        debug!("Fetching lowest listings for {} from {}", item, url);

        let body = serde_json::json!({
            "search": item,
            "sort": "lowest_price",
        });

        let response = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let raw: RawListingResponse = response.json().await?;
        match raw.result {
            Some(result) => Ok(ListingPage { result }),
            None => Err(GatewayError::EmptyResponse),
        }
    }

    async fn fetch_recent_transactions(
        &self,
        page: u32,
    ) -> Result<TransactionPage, GatewayError> {
        let url = format!("{}/v1/auction/transactions/{}", self.base_url, page);
        debug!("Fetching recent transactions from {}", url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("Authorization", &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let raw: RawTransactionResponse = response.json().await?;
        match raw.result {
            Some(result) => Ok(TransactionPage { result }),
            None => Err(GatewayError::EmptyResponse),
        }
    }
}
