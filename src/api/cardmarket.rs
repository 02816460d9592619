//! Cardmarket marketplace client (products, articles, wantslists, account)
//!
//! Wire shapes follow the Cardmarket v2.0 JSON output format (camelCase).
//! The batch endpoints may return fewer results than requested; callers
//! resolve the remainder through [`crate::fetcher::BatchFetcher`].

use crate::config::SearchFilters;
use crate::error::{BuywizardError, Result};
use serde::Deserialize;

const BASE_URL: &str = "https://api.cardmarket.com/ws/v2.0/output.json";
const USER_AGENT: &str = "Buywizard/0.1";

/// Catalog product entry
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id_product: u64,
    #[serde(default)]
    pub en_name: Option<String>,
    /// Number of articles listed for this product, used to pick the most
    /// traded printing when a name matches several products
    #[serde(default)]
    pub count_articles: Option<u64>,
}

impl Product {
    /// Human-readable label, falling back to the product id
    pub fn display_name(&self) -> String {
        match &self.en_name {
            Some(name) => name.clone(),
            None => format!("product #{}", self.id_product),
        }
    }
}

/// One seller's listing for a product
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub price: f64,
    pub seller: Seller,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id_user: u64,
    #[serde(default)]
    pub username: Option<String>,
    pub address: Address,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub country: String,
}

/// Articles of one product, as returned by the batched article lookup
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSet {
    #[serde(default)]
    pub article: Vec<Article>,
}

/// Metaproduct expansion result: the physical-print products it groups
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MetaproductResult {
    #[serde(default)]
    pub product: Vec<Product>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub name: AccountName,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Wantslist {
    pub id_wantslist: u64,
    pub name: String,
    #[serde(default)]
    pub item_count: u64,
}

/// Wantslist entry, tagged `product` or `metaproduct`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WantItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub id_product: Option<u64>,
    #[serde(default)]
    pub id_metaproduct: Option<u64>,
    /// Embedded product details, when the marketplace includes them
    #[serde(default)]
    pub product: Vec<Product>,
}

// Response envelopes

#[derive(Debug, Deserialize)]
struct FindProductResponse {
    #[serde(default)]
    product: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    article: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct BatchItemsResponse<T> {
    #[serde(default = "Vec::new")]
    item: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    account: Account,
}

#[derive(Debug, Deserialize)]
struct WantslistsResponse {
    #[serde(default)]
    wantslist: Vec<Wantslist>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking Cardmarket REST client
pub struct CardmarketClient {
    client: reqwest::blocking::Client,
    base_url: String,
    app_token: Option<String>,
}

impl CardmarketClient {
    pub fn new(app_token: Option<String>) -> Self {
        Self::with_base_url(BASE_URL, app_token)
    }

    /// Client against a custom base URL (for testing with mock servers).
    pub(crate) fn with_base_url(base_url: &str, app_token: Option<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token,
        }
    }

    /// Search the catalog for products matching a card name
    pub fn find_product(&self, name: &str, exact: bool) -> Result<Vec<Product>> {
        let path = format!(
            "products/find?search={}&exact={}",
            urlencoding::encode(name),
            exact
        );
        log::debug!("Finding product: {}", name);

        let response: FindProductResponse = self.get(&path, &[])?;
        Ok(response.product)
    }

    /// Fetch all articles for a single product
    pub fn get_articles(&self, id_product: u64, filters: &SearchFilters) -> Result<Vec<Article>> {
        let path = format!("articles/{}", id_product);
        let response: ArticlesResponse = self.get(&path, &filter_query(filters))?;
        Ok(response.article)
    }

    /// Batched article lookup. May return fewer article sets than product
    /// ids requested, in arrival order only.
    pub fn get_articles_batch(
        &self,
        product_ids: &[u64],
        filters: &SearchFilters,
    ) -> Result<Vec<ArticleSet>> {
        let mut query = vec![("idList".to_string(), id_list(product_ids))];
        query.extend(filter_query(filters));

        let response: BatchItemsResponse<ArticleSet> = self.get("articles", &query)?;
        Ok(response.item)
    }

    /// Batched metaproduct lookup, same partial-result semantics as
    /// [`Self::get_articles_batch`]
    pub fn get_metaproducts_batch(
        &self,
        metaproduct_ids: &[u64],
    ) -> Result<Vec<MetaproductResult>> {
        let query = [("idList".to_string(), id_list(metaproduct_ids))];
        let response: BatchItemsResponse<MetaproductResult> =
            self.get("metaproducts", &query)?;
        Ok(response.item)
    }

    pub fn get_account(&self) -> Result<Account> {
        let response: AccountResponse = self.get("account", &[])?;
        Ok(response.account)
    }

    pub fn get_wantslists(&self) -> Result<Vec<Wantslist>> {
        let response: WantslistsResponse = self.get("wantslist", &[])?;
        Ok(response.wantslist)
    }

    pub fn get_wantslist_items(&self, id_wantslist: u64) -> Result<Vec<WantItem>> {
        let path = format!("wantslist/{}", id_wantslist);
        let response: BatchItemsResponse<WantItem> = self.get(&path, &[])?;
        Ok(response.item)
    }

    /// GET a path under the base URL and deserialize the JSON body
    fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.client.get(&url).header("User-Agent", USER_AGENT);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.app_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            // Cardmarket error responses carry an "error" field
            return Err(match response.json::<ErrorBody>() {
                Ok(body) => BuywizardError::ApiResponse {
                    code: status.as_u16().to_string(),
                    details: body.error,
                },
                Err(_) => BuywizardError::HttpStatus(status),
            });
        }

        Ok(response.json()?)
    }
}

fn id_list(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Query parameters for the typed search filters (countries are filtered
/// client-side and never sent)
fn filter_query(filters: &SearchFilters) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(condition) = &filters.min_condition {
        query.push(("minCondition".to_string(), condition.clone()));
    }
    if let Some(language) = filters.id_language {
        query.push(("idLanguage".to_string(), language.to_string()));
    }
    if let Some(max) = filters.max_results {
        query.push(("maxResults".to_string(), max.to_string()));
    }
    query
}

#[cfg(test)]
#[path = "cardmarket_tests.rs"]
mod tests;
