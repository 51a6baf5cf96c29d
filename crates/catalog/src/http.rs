//! HTTP implementation of [`CatalogApi`] over `reqwest`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storefront_core::{Product, ProductId, SkuId, StorefrontConfig};

use crate::api::{
    CartRequest, CatalogApi, CatalogError, CheckoutSession, SkuDetail, WalletCart,
    WalletCartResponse,
};

/// Catalog client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct SkuDetailRequest<'a> {
    #[serde(rename = "productId")]
    product_id: &'a ProductId,
    #[serde(rename = "skuId")]
    sku_id: &'a SkuId,
}

impl HttpCatalog {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    /// Build a client honoring the configured base URL and request timeout.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self::with_client(client, config.api_base.clone()))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let resp = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let request = self.client.get(self.url("search")).query(&[("q", term)]);
        let body: SearchResponse = self.send_json(request).await?;

        let raw = body.results.unwrap_or_default();
        let total = raw.len();
        let products: Vec<Product> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::debug!("skipping malformed search result for {term:?}: {err}");
                    None
                }
            })
            .collect();

        if products.len() < total {
            tracing::warn!(
                "search {:?}: dropped {} of {} malformed results",
                term,
                total - products.len(),
                total
            );
        }

        Ok(products)
    }

    async fn sku_details(
        &self,
        product_id: &ProductId,
        sku_id: &SkuId,
    ) -> Result<SkuDetail, CatalogError> {
        let request = self
            .client
            .post(self.url("sku-details"))
            .json(&SkuDetailRequest { product_id, sku_id });
        self.send_json(request).await
    }

    async fn add_to_cart(&self, request: &CartRequest) -> Result<CheckoutSession, CatalogError> {
        let request = self.client.post(self.url("cart/add")).json(request);
        self.send_json(request).await
    }

    async fn wallet_cart(&self, request: &CartRequest) -> Result<Option<WalletCart>, CatalogError> {
        let request = self.client.post(self.url("metamask-checkout")).json(request);
        let body: WalletCartResponse = self.send_json(request).await?;
        Ok(body.cart)
    }
}
