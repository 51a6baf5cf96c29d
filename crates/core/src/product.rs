//! Catalog product model as returned by the storefront backend.

use serde::{Deserialize, Serialize};

use crate::delivery::{DeliveryDays, DeliveryEstimate};
use crate::id::{ProductId, SkuId};
use crate::money::{self, Money};

/// A product record from the search service.
///
/// Field names follow the backend wire format. Decoding is lenient: a missing
/// or unparseable price is zero and an unknown shipping fee is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "money::lenient")]
    pub price: Money,
    #[serde(
        default,
        deserialize_with = "money::optional",
        serialize_with = "money::serialize_optional"
    )]
    pub shipping_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sku_id: SkuId,
    #[serde(default)]
    pub min_delivery_days: DeliveryDays,
    #[serde(default)]
    pub max_delivery_days: DeliveryDays,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "skuImage", skip_serializing_if = "Option::is_none")]
    pub sku_image: Option<String>,
}

impl Product {
    pub fn delivery(&self) -> DeliveryEstimate {
        DeliveryEstimate::new(self.min_delivery_days, self.max_delivery_days)
    }

    /// Eligible for listing: at least one delivery bound is known.
    pub fn has_delivery_info(&self) -> bool {
        self.delivery().is_known()
    }

    /// Shipping fee, treating an unknown fee as free.
    pub fn shipping_or_zero(&self) -> Money {
        self.shipping_fee.unwrap_or(Money::ZERO)
    }

    /// Preferred display image: the SKU image, then the primary image.
    pub fn display_image(&self) -> Option<&str> {
        non_empty(self.sku_image.as_deref()).or_else(|| non_empty(self.image.as_deref()))
    }

    /// Copy of this product with SKU detail merged in.
    ///
    /// A missing color becomes `""`; a missing SKU image falls back to the
    /// primary image.
    pub fn with_sku_detail(&self, color: Option<String>, sku_image: Option<String>) -> Product {
        Product {
            color: Some(color.unwrap_or_default()),
            sku_image: sku_image
                .filter(|s| !s.is_empty())
                .or_else(|| self.image.clone()),
            ..self.clone()
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Ordered products shown by the featured carousel, one per search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturedSet(Vec<Product>);

impl FeaturedSet {
    pub fn new(products: Vec<Product>) -> Self {
        Self(products)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.0.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Product> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Product> {
        self.0
    }
}

impl From<Vec<Product>> for FeaturedSet {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}

impl<'a> IntoIterator for &'a FeaturedSet {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
