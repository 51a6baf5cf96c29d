use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use storefront_catalog::{
    search_listing, CartRequest, CatalogApi, CatalogError, HttpCatalog, ImageProxy, SearchOutcome,
    SearchQuery,
};
use storefront_core::{DeliveryDays, Money};

struct FakeBackend {
    api_base: String,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    async fn spawn() -> Self {
        let app = Router::new()
            .route("/api/search", get(search))
            .route("/api/sku-details", post(sku_details))
            .route("/api/cart/add", post(add_to_cart))
            .route("/api/metamask-checkout", post(wallet_cart));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            api_base: format!("http://{}/api", addr),
            handle,
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("q").map(String::as_str) {
        Some("Smart Watch & Band") => (
            StatusCode::OK,
            Json(json!({
                "results": [
                    { "id": 1, "title": "Band", "price": "9.50", "shipping_fee": "N/A",
                      "sku_id": "11", "min_delivery_days": 3, "max_delivery_days": "N/A" },
                    { "id": 2, "title": "Slow band", "price": 5,
                      "min_delivery_days": "N/A", "max_delivery_days": "N/A" },
                    "not a product"
                ]
            })),
        ),
        Some("empty") => (StatusCode::OK, Json(json!({}))),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "down" }))),
        _ => (StatusCode::OK, Json(json!({ "results": [] }))),
    }
}

async fn sku_details(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["productId"], "1");
    assert_eq!(body["skuId"], "11");
    Json(json!({ "color": "Black", "skuImage": "https://cdn/black.jpg" }))
}

async fn add_to_cart(Json(body): Json<CartRequest>) -> Json<Value> {
    if body.product_id.as_str() == "1" {
        Json(json!({ "url": "https://pay.example/session/abc" }))
    } else {
        Json(json!({}))
    }
}

async fn wallet_cart(Json(body): Json<CartRequest>) -> Json<Value> {
    Json(json!({
        "cart": {
            "title": body.title,
            "price": 9.5,
            "shipping": 0,
            "image": body.image,
            "discountTotal": "8.55",
            "total": 9.5,
            "productId": body.product_id
        }
    }))
}

fn request(product_id: &str) -> CartRequest {
    CartRequest {
        title: "Band".into(),
        price: Money::from_cents(950),
        shipping_fee: Money::ZERO,
        image: "https://cdn/band.jpg".into(),
        product_id: product_id.into(),
        sku_id: "11".into(),
    }
}

#[tokio::test]
async fn search_encodes_term_and_skips_malformed_results() {
    let backend = FakeBackend::spawn().await;
    let catalog = HttpCatalog::new(backend.api_base.clone());

    let products = catalog.search("Smart Watch & Band").await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].min_delivery_days, DeliveryDays::Days(3));
    assert_eq!(products[0].shipping_fee, None);
    assert_eq!(products[1].price, Money::from_cents(500));

    assert!(catalog.search("empty").await.unwrap().is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let backend = FakeBackend::spawn().await;
    let catalog = HttpCatalog::new(backend.api_base.clone());

    match catalog.search("boom").await {
        Err(CatalogError::Api(500, body)) => assert!(body.contains("down")),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let catalog = HttpCatalog::new("http://127.0.0.1:1/api");
    assert!(matches!(
        catalog.search("anything").await,
        Err(CatalogError::Network(_))
    ));
}

#[tokio::test]
async fn sku_cart_and_wallet_endpoints() {
    let backend = FakeBackend::spawn().await;
    let catalog = HttpCatalog::new(backend.api_base.clone());

    let detail = catalog
        .sku_details(&"1".into(), &"11".into())
        .await
        .unwrap();
    assert_eq!(detail.color.as_deref(), Some("Black"));
    assert_eq!(detail.sku_image.as_deref(), Some("https://cdn/black.jpg"));

    let session = catalog.add_to_cart(&request("1")).await.unwrap();
    assert_eq!(session.url.as_deref(), Some("https://pay.example/session/abc"));
    let session = catalog.add_to_cart(&request("2")).await.unwrap();
    assert_eq!(session.url, None);

    let cart = catalog.wallet_cart(&request("1")).await.unwrap().unwrap();
    assert_eq!(cart.discount_total, Money::from_cents(855));
    assert_eq!(cart.product_id.as_str(), "1");
}

#[tokio::test]
async fn listing_filters_undeliverable_results() {
    let backend = FakeBackend::spawn().await;
    let catalog = HttpCatalog::new(backend.api_base.clone());
    let proxy = ImageProxy::new(catalog.api_base());

    let query = SearchQuery::parse(" Smart Watch & Band ").unwrap();
    match search_listing(&catalog, &query, &proxy).await.unwrap() {
        SearchOutcome::Listing(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].title, "Band");
            assert_eq!(cards[0].delivery, "3 Days");
            assert_eq!(cards[0].total.to_string(), "9.50");
        }
        other => panic!("expected listing, got {other:?}"),
    }

    let query = SearchQuery::parse("nothing").unwrap();
    assert_eq!(
        search_listing(&catalog, &query, &proxy).await.unwrap(),
        SearchOutcome::NoProducts
    );
}
