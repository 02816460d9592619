//! Wantslist resolution: turn a Cardmarket wantslist into buyable products
//!
//! Direct product wants are taken as-is; metaproduct wants are expanded into
//! their physical-print products through the batched metaproduct lookup.

use crate::api::cardmarket::{CardmarketClient, Product};
use crate::error::Result;
use crate::fetcher::BatchFetcher;

/// Fetch a wantslist and resolve every entry to concrete products
pub fn resolve_wantslist_products(
    client: &CardmarketClient,
    id_wantslist: u64,
) -> Result<Vec<Product>> {
    let items = client.get_wantslist_items(id_wantslist)?;

    let mut products: Vec<Product> = Vec::new();
    let mut metaproduct_ids: Vec<u64> = Vec::new();

    for item in &items {
        match item.item_type.as_str() {
            "product" => {
                if let Some(product) = item.product.first() {
                    products.push(product.clone());
                } else if let Some(id_product) = item.id_product {
                    products.push(Product {
                        id_product,
                        en_name: None,
                        count_articles: None,
                    });
                } else {
                    log::warn!("Ignoring product want without a product id");
                }
            }
            "metaproduct" => match item.id_metaproduct {
                Some(id) => metaproduct_ids.push(id),
                None => log::warn!("Ignoring metaproduct want without a metaproduct id"),
            },
            other => log::warn!("Ignoring wantslist item of unknown type: {}", other),
        }
    }

    if !metaproduct_ids.is_empty() {
        log::info!("Expanding {} metaproduct wants", metaproduct_ids.len());
        let expanded = BatchFetcher::default()
            .fetch(&metaproduct_ids, |queue| {
                client.get_metaproducts_batch(queue)
            })?;
        for result in expanded {
            products.extend(result.product);
        }
    }

    log::info!(
        "Wantslist {} resolved to {} products",
        id_wantslist,
        products.len()
    );
    Ok(products)
}
