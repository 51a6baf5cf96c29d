//! Card-payment checkout.

use storefront_catalog::{CatalogApi, ProductCard};

use crate::CheckoutError;

/// Create a payment session for `card` and return the URL to open.
pub async fn start_card_checkout<A>(api: &A, card: &ProductCard) -> Result<String, CheckoutError>
where
    A: CatalogApi + ?Sized,
{
    let session = api.add_to_cart(&card.cart_request()).await.map_err(|e| {
        tracing::error!("card checkout for product {} failed: {}", card.product_id, e);
        e
    })?;

    match session.url.filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            tracing::info!("card checkout session created for product {}", card.product_id);
            Ok(url)
        }
        None => {
            tracing::warn!("backend returned no session URL for product {}", card.product_id);
            Err(CheckoutError::NoSession)
        }
    }
}
