//! Product page links.

use storefront_core::Product;
use url::form_urlencoded;

use crate::image::ImageProxy;

/// Relative link to the product detail page, carrying the product as query
/// parameters (form-urlencoded, image proxied).
pub fn product_page_url(product: &Product, proxy: &ImageProxy) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", product.id.as_str())
        .append_pair("title", &product.title)
        .append_pair("price", &product.price.to_string())
        .append_pair("shipping", &product.shipping_or_zero().to_string())
        .append_pair("image", &proxy.proxy(product.display_image().unwrap_or_default()))
        .append_pair("skuId", product.sku_id.as_str())
        .append_pair("minDelivery", &product.min_delivery_days.to_string())
        .append_pair("maxDelivery", &product.max_delivery_days.to_string())
        .append_pair("color", product.color.as_deref().unwrap_or_default())
        .finish();

    format!("product.html?{query}")
}
