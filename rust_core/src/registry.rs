//! Static registry of tracked market items.
//!
//! The set is fixed at startup; everything downstream (stores, jobs, HTTP
//! handlers) is parameterized over it. Items are plain auction-house ids
//! such as `"diamond"`, without the `minecraft:` namespace prefix.

/// Items tracked when no explicit list is configured.
pub const DEFAULT_MARKETS: &[&str] = &[
    "netherite_ingot",
    "ancient_debris",
    "diamond_block",
    "diamond",
];

/// Ordered set of tracked item ids.
#[derive(Debug, Clone)]
pub struct MarketRegistry {
    items: Vec<String>,
}

impl MarketRegistry {
    /// Build a registry from an explicit item list, dropping duplicates
    /// while keeping first-seen order.
    pub fn new(items: Vec<String>) -> Self {
        let mut seen = Vec::with_capacity(items.len());
        for item in items {
            if !seen.contains(&item) {
                seen.push(item);
            }
        }
        Self { items: seen }
    }

    /// Registry over the default tracked items.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MARKETS.iter().map(|s| s.to_string()).collect())
    }

    /// Tracked items in fixed registry order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
