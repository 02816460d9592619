//! Price matrix construction: cards as rows, sellers as columns
//!
//! The matrix is built incrementally while cards are processed: the seller
//! index grows as new sellers appear, existing columns never move, and a
//! final padding pass makes every row rectangular. Cells without an offer
//! hold [`NO_OFFER`].

use crate::api::cardmarket::{Article, CardmarketClient, Product};
use crate::config::SearchFilters;
use crate::error::{BuywizardError, Result};
use crate::fetcher::BatchFetcher;

/// Sentinel price for "this seller has no offer for this card"
pub const NO_OFFER: f64 = f64::INFINITY;

/// Dense card × seller price table
#[derive(Debug, Clone)]
pub struct PriceMatrix {
    cards: Vec<String>,
    sellers: Vec<u64>,
    rows: Vec<Vec<f64>>,
}

impl PriceMatrix {
    /// Build the matrix from per-card candidate articles.
    ///
    /// `articles_per_card` is positionally aligned with `cards`. Articles
    /// from sellers outside the configured countries are discarded, each
    /// seller keeps only its cheapest listing per card, and cards left with
    /// no offer at all are warned about and removed.
    pub fn build(
        cards: &[String],
        articles_per_card: &[Vec<Article>],
        filters: &SearchFilters,
    ) -> Self {
        debug_assert_eq!(cards.len(), articles_per_card.len());

        let mut sellers: Vec<u64> = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for articles in articles_per_card {
            // New card starts as a no-offer row sized to the sellers so far
            let mut row = vec![NO_OFFER; sellers.len()];
            for (seller, price) in cheapest_per_seller(articles, filters) {
                match sellers.iter().position(|&s| s == seller) {
                    Some(col) => row[col] = price,
                    None => {
                        sellers.push(seller);
                        row.push(price);
                    }
                }
            }
            rows.push(row);
        }

        // Sellers discovered late have no column in earlier rows yet
        for row in &mut rows {
            row.resize(sellers.len(), NO_OFFER);
        }

        // Drop cards nobody offers, back to front so indices stay valid
        let mut cards = cards.to_vec();
        for ind in (0..rows.len()).rev() {
            if rows[ind].iter().all(|&price| price == NO_OFFER) {
                log::warn!(
                    "No sellers found in search filters for [{}]. Removing from optimization",
                    cards[ind]
                );
                rows.remove(ind);
                cards.remove(ind);
            }
        }

        Self {
            cards,
            sellers,
            rows,
        }
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn sellers(&self) -> &[u64] {
        &self.sellers
    }

    pub fn num_cards(&self) -> usize {
        self.rows.len()
    }

    pub fn num_sellers(&self) -> usize {
        self.sellers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, card: usize) -> &[f64] {
        &self.rows[card]
    }

    pub fn get(&self, card: usize, seller: usize) -> f64 {
        self.rows[card][seller]
    }

    /// Cheapest offer for a card across all sellers
    pub fn row_min(&self, card: usize) -> f64 {
        self.rows[card].iter().copied().fold(NO_OFFER, f64::min)
    }

    /// Column of a seller id, if that seller offers anything
    pub fn seller_column(&self, id_user: u64) -> Option<usize> {
        self.sellers.iter().position(|&s| s == id_user)
    }
}

/// Country-filter the articles and keep one cheapest listing per seller,
/// in order of first appearance
fn cheapest_per_seller(articles: &[Article], filters: &SearchFilters) -> Vec<(u64, f64)> {
    let mut offers: Vec<(u64, f64)> = Vec::new();
    for article in articles {
        if !filters.allows_country(&article.seller.address.country) {
            continue;
        }
        let seller = article.seller.id_user;
        match offers.iter_mut().find(|(s, _)| *s == seller) {
            Some((_, price)) => {
                if article.price < *price {
                    *price = article.price;
                }
            }
            None => offers.push((seller, article.price)),
        }
    }
    offers
}

/// Pick the product to buy when a name matches several printings: the one
/// with the most listed articles.
pub fn pick_best_product<'a>(name: &str, products: &'a [Product]) -> Result<&'a Product> {
    products
        .iter()
        .max_by_key(|p| p.count_articles.unwrap_or(0))
        .ok_or_else(|| BuywizardError::NoProductMatch(name.to_string()))
}

/// Resolve card names to products and build their price matrix.
///
/// Cards without a product match are warned about and dropped, matching the
/// treatment of cards without sellers.
pub fn extract_price_matrix(
    client: &CardmarketClient,
    cards: &[String],
    filters: &SearchFilters,
) -> Result<PriceMatrix> {
    let mut matched: Vec<Product> = Vec::new();
    for card in cards {
        let products = client.find_product(card, true)?;
        match pick_best_product(card, &products) {
            Ok(product) => {
                let mut product = product.clone();
                // Keep the requested name as the row label
                product.en_name = Some(card.clone());
                matched.push(product);
            }
            Err(BuywizardError::NoProductMatch(_)) => {
                log::warn!("No product match for [{}]. Removing from optimization", card);
            }
            Err(e) => return Err(e),
        }
    }
    log::info!("Matched {}/{} cards to products", matched.len(), cards.len());

    extract_price_matrix_for_products(client, &matched, filters)
}

/// Build the price matrix for already-resolved products (wantslist mode)
pub fn extract_price_matrix_for_products(
    client: &CardmarketClient,
    products: &[Product],
    filters: &SearchFilters,
) -> Result<PriceMatrix> {
    let labels: Vec<String> = products.iter().map(|p| p.display_name()).collect();
    let ids: Vec<u64> = products.iter().map(|p| p.id_product).collect();

    let article_sets = BatchFetcher::default()
        .fetch(&ids, |queue| client.get_articles_batch(queue, filters))?;
    let articles_per_card: Vec<Vec<Article>> =
        article_sets.into_iter().map(|set| set.article).collect();

    Ok(PriceMatrix::build(&labels, &articles_per_card, filters))
}
