//! API clients for external services (Cardmarket)

pub mod cardmarket;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use cardmarket::{Account, Article, ArticleSet, CardmarketClient, Product, Seller, Wantslist};
