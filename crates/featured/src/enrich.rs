//! SKU detail enrichment for the featured set.

use futures::future::join_all;
use storefront_catalog::CatalogApi;
use storefront_core::{FeaturedSet, Product};

/// Merge SKU detail into every product, concurrently.
///
/// Order follows the input set. A failed lookup leaves that product with an
/// empty color and its primary image as SKU image.
pub async fn enrich<A>(api: &A, featured: FeaturedSet) -> FeaturedSet
where
    A: CatalogApi + ?Sized,
{
    let lookups = featured.iter().map(|product| async move {
        match api.sku_details(&product.id, &product.sku_id).await {
            Ok(detail) => product.with_sku_detail(detail.color, detail.sku_image),
            Err(err) => {
                tracing::warn!(
                    "sku detail for product {} (sku {}) failed: {}",
                    product.id,
                    product.sku_id,
                    err
                );
                product.with_sku_detail(None, None)
            }
        }
    });

    join_all(lookups).await.into()
}
