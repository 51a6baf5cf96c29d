//! Catalog backend contract: request/response shapes and the client trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_core::money::{self, Money};
use storefront_core::{Product, ProductId, SkuId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// SKU-level detail for a product variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkuDetail {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "skuImage")]
    pub sku_image: Option<String>,
}

/// Body shared by the card and wallet cart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRequest {
    pub title: String,
    #[serde(serialize_with = "money::serialize_number")]
    pub price: Money,
    #[serde(serialize_with = "money::serialize_number")]
    pub shipping_fee: Money,
    pub image: String,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    #[serde(rename = "skuId")]
    pub sku_id: SkuId,
}

/// Response of the card checkout endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub url: Option<String>,
}

/// Priced cart returned by the wallet checkout endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WalletCart {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "money::lenient")]
    pub price: Money,
    #[serde(default, deserialize_with = "money::lenient")]
    pub shipping: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "discountTotal", deserialize_with = "money::lenient")]
    pub discount_total: Money,
    #[serde(default, deserialize_with = "money::lenient")]
    pub total: Money,
    #[serde(default, rename = "productId")]
    pub product_id: ProductId,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WalletCartResponse {
    #[serde(default)]
    pub cart: Option<WalletCart>,
}

/// Client for the catalog backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Products matching a free-text term.
    async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError>;

    async fn sku_details(
        &self,
        product_id: &ProductId,
        sku_id: &SkuId,
    ) -> Result<SkuDetail, CatalogError>;

    /// Create a card-payment session for one product.
    async fn add_to_cart(&self, request: &CartRequest) -> Result<CheckoutSession, CatalogError>;

    /// Price a one-product cart for wallet checkout. `None` if the backend
    /// answered without a cart.
    async fn wallet_cart(&self, request: &CartRequest) -> Result<Option<WalletCart>, CatalogError>;
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        (**self).search(term).await
    }

    async fn sku_details(
        &self,
        product_id: &ProductId,
        sku_id: &SkuId,
    ) -> Result<SkuDetail, CatalogError> {
        (**self).sku_details(product_id, sku_id).await
    }

    async fn add_to_cart(&self, request: &CartRequest) -> Result<CheckoutSession, CatalogError> {
        (**self).add_to_cart(request).await
    }

    async fn wallet_cart(&self, request: &CartRequest) -> Result<Option<WalletCart>, CatalogError> {
        (**self).wallet_cart(request).await
    }
}
