//! Configuration for market_tracker_rust

use anyhow::{anyhow, Result};
use orewatch_rust_core::registry::DEFAULT_MARKETS;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Auction API base URL.
    pub api_base_url: String,
    /// Auction API credential, sent as the Authorization header.
    pub api_key: String,
    /// Tracked item ids, in registry order.
    pub markets: Vec<String>,
    /// Interval between polling cycles (both jobs).
    pub poll_interval: Duration,
    /// Upper bound on any single outbound request.
    pub request_timeout: Duration,
    /// HTTP listen port.
    pub listen_port: u16,
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("DONUT_API_KEY")
            .map_err(|_| anyhow!("DONUT_API_KEY must be set"))?;

        let poll_interval_secs = parse_u64("TRACKER_POLL_INTERVAL_SECS", 2)?;
        let request_timeout_secs = parse_u64("TRACKER_REQUEST_TIMEOUT_SECS", 10)?;

        if poll_interval_secs == 0 {
            return Err(anyhow!("TRACKER_POLL_INTERVAL_SECS must be > 0"));
        }
        if request_timeout_secs == 0 {
            return Err(anyhow!("TRACKER_REQUEST_TIMEOUT_SECS must be > 0"));
        }

        let markets = parse_market_list(
            &env::var("TRACKER_MARKETS").unwrap_or_else(|_| DEFAULT_MARKETS.join(",")),
        );
        if markets.is_empty() {
            return Err(anyhow!("TRACKER_MARKETS must name at least one item"));
        }

        Ok(Self {
            api_base_url: env::var("DONUT_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.donutsmp.net".to_string()),
            api_key,
            markets,
            poll_interval: Duration::from_secs(poll_interval_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            listen_port: parse_u16("TRACKER_HTTP_PORT", 3000)?,
        })
    }
}

/// Split a comma-separated item list, trimming whitespace and dropping
/// empty segments.
fn parse_market_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse environment variable as u64 with default fallback
fn parse_u64(var_name: &str, default: u64) -> Result<u64> {
    match env::var(var_name) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!("{} must be a valid u64", var_name)),
        Err(_) => Ok(default),
    }
}

/// Parse environment variable as u16 with default fallback
fn parse_u16(var_name: &str, default: u16) -> Result<u16> {
    match env::var(var_name) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!("{} must be a valid u16", var_name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_market_list() {
        assert_eq!(
            parse_market_list("diamond, ancient_debris ,,diamond_block"),
            vec!["diamond", "ancient_debris", "diamond_block"]
        );
        assert!(parse_market_list("").is_empty());
        assert!(parse_market_list(" , ").is_empty());
    }

    #[test]
    fn test_default_markets_parse_cleanly() {
        let markets = parse_market_list(&DEFAULT_MARKETS.join(","));
        assert_eq!(markets.len(), DEFAULT_MARKETS.len());
    }
}
