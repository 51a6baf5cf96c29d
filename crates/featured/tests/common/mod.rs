#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_catalog::{
    CartRequest, CatalogApi, CatalogError, CheckoutSession, SkuDetail, WalletCart,
};
use storefront_core::{DeliveryDays, Money, Product, ProductId, SkuId};
use storefront_featured::{CarouselCard, Renderer};

/// Catalog with canned search results per term. Terms missing from the map
/// fail with a 503; products listed in `failing_skus` fail their SKU lookup.
#[derive(Default)]
pub struct FakeCatalog {
    pub results: HashMap<String, Vec<Product>>,
    pub failing_skus: Vec<String>,
    pub searches: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with(mut self, term: &str, products: Vec<Product>) -> Self {
        self.results.insert(term.to_string(), products);
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        self.searches.lock().unwrap().push(term.to_string());
        self.results
            .get(term)
            .cloned()
            .ok_or_else(|| CatalogError::Api(503, format!("no results for {term}")))
    }

    async fn sku_details(
        &self,
        product_id: &ProductId,
        _sku_id: &SkuId,
    ) -> Result<SkuDetail, CatalogError> {
        if self.failing_skus.iter().any(|id| id == product_id.as_str()) {
            return Err(CatalogError::Network("connection reset".into()));
        }
        Ok(SkuDetail {
            color: Some("Black".into()),
            sku_image: Some(format!("https://cdn/{}-black.jpg", product_id)),
        })
    }

    async fn add_to_cart(&self, _request: &CartRequest) -> Result<CheckoutSession, CatalogError> {
        Ok(CheckoutSession { url: None })
    }

    async fn wallet_cart(&self, _request: &CartRequest) -> Result<Option<WalletCart>, CatalogError> {
        Ok(None)
    }
}

pub fn product(id: &str, min: DeliveryDays, max: DeliveryDays) -> Product {
    Product {
        id: id.into(),
        title: format!("Product {id}"),
        price: Money::from_cents(1999),
        image: Some(format!("https://cdn/{id}.jpg")),
        sku_id: format!("{id}-sku").as_str().into(),
        min_delivery_days: min,
        max_delivery_days: max,
        ..Product::default()
    }
}

pub fn deliverable(id: &str) -> Product {
    product(id, DeliveryDays::Days(2), DeliveryDays::Days(5))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FadeOut,
    Present(CarouselCard),
    Message(String),
    Paused(bool),
}

/// Renderer that records into a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn presented(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Present(card) => Some(card.index),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn fade_out(&mut self) {
        self.events.lock().unwrap().push(Event::FadeOut);
    }

    fn present(&mut self, card: &CarouselCard) {
        self.events.lock().unwrap().push(Event::Present(card.clone()));
    }

    fn show_message(&mut self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Message(message.to_string()));
    }

    fn set_paused(&mut self, paused: bool) {
        self.events.lock().unwrap().push(Event::Paused(paused));
    }
}
