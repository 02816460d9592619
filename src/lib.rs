//! Buywizard - Cardmarket buylist optimizer
//!
//! Resolves a list of wanted cards against the Cardmarket catalog, fetches
//! seller listings through the partial-result batch endpoints, builds a
//! card × seller price matrix and evaluates seller-assignment batches for
//! total cost (item prices plus tiered shipping).

pub mod api;
pub mod batching;
pub mod cardlist;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod matrix;
pub mod shipping;
pub mod wantslist;

// Re-export commonly used items
pub use api::cardmarket::{Account, Article, CardmarketClient, Product, Seller, Wantslist};
pub use batching::Batching;
pub use cardlist::{load_cardlist, CardListFormat};
pub use config::{Config, SearchFilters};
pub use error::{BuywizardError, Result};
pub use fetcher::BatchFetcher;
pub use matrix::{
    extract_price_matrix, extract_price_matrix_for_products, pick_best_product, PriceMatrix,
    NO_OFFER,
};
pub use shipping::{calc_shipping_cost, MAX_ITEMS_PER_SELLER};
pub use wantslist::resolve_wantslist_products;
