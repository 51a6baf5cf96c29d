//! Search listing: query validation and product cards.

use storefront_core::{DomainError, DomainResult, Money, Product, ProductId, SkuId};

use crate::api::{CartRequest, CatalogApi, CatalogError};
use crate::image::ImageProxy;

/// Percentage taken off when paying with the wallet token.
pub const WALLET_DISCOUNT_PERCENT: u8 = 10;

/// A validated, trimmed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Please enter a search term."));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a search produced, from the shopper's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoProducts,
    NoDeliverable,
    Listing(Vec<ProductCard>),
}

impl SearchOutcome {
    /// Message for the empty states.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::NoProducts => Some("No products found."),
            SearchOutcome::NoDeliverable => Some("No products with valid delivery info found."),
            SearchOutcome::Listing(_) => None,
        }
    }
}

/// Display model of one search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub sku_id: SkuId,
    pub title: String,
    pub price: Money,
    pub shipping: Money,
    pub total: Money,
    pub wallet_price: Money,
    pub delivery: String,
    /// Proxied image (or placeholder).
    pub image: String,
    /// The record the card was built from; the wallet flow posts its raw fields.
    pub product: Product,
}

impl ProductCard {
    pub fn from_product(product: &Product, proxy: &ImageProxy) -> Self {
        let title = if product.title.trim().is_empty() {
            "No title".to_string()
        } else {
            product.title.clone()
        };
        let shipping = product.shipping_or_zero();

        Self {
            product_id: product.id.clone(),
            sku_id: product.sku_id.clone(),
            title,
            price: product.price,
            shipping,
            total: product.price.saturating_add(shipping),
            wallet_price: product.price.discounted(WALLET_DISCOUNT_PERCENT),
            delivery: product.delivery().label(),
            image: proxy.proxy_or_placeholder(product.display_image()),
            product: product.clone(),
        }
    }

    /// Card checkout body: the card's own (proxied) fields.
    pub fn cart_request(&self) -> CartRequest {
        CartRequest {
            title: self.title.clone(),
            price: self.price,
            shipping_fee: self.shipping,
            image: self.image.clone(),
            product_id: self.product_id.clone(),
            sku_id: self.sku_id.clone(),
        }
    }
}

/// Run a search and turn deliverable results into cards.
pub async fn search_listing<A>(
    api: &A,
    query: &SearchQuery,
    proxy: &ImageProxy,
) -> Result<SearchOutcome, CatalogError>
where
    A: CatalogApi + ?Sized,
{
    let results = api.search(query.as_str()).await?;
    if results.is_empty() {
        tracing::info!("search {:?}: no results", query.as_str());
        return Ok(SearchOutcome::NoProducts);
    }

    let cards: Vec<ProductCard> = results
        .iter()
        .filter(|p| p.has_delivery_info())
        .map(|p| ProductCard::from_product(p, proxy))
        .collect();

    tracing::info!(
        "search {:?}: {} results, {} deliverable",
        query.as_str(),
        results.len(),
        cards.len()
    );

    if cards.is_empty() {
        Ok(SearchOutcome::NoDeliverable)
    } else {
        Ok(SearchOutcome::Listing(cards))
    }
}
