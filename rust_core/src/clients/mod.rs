pub mod donut;

// Re-export commonly used types
pub use donut::{
    AuctionApi, DonutClient, GatewayError, ItemStack, ListingEntry, ListingPage,
    TransactionEntry, TransactionPage,
};
