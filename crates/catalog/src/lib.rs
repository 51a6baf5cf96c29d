//! `storefront-catalog`
//!
//! **Responsibility:** everything the storefront needs from the catalog
//! backend, behind the [`CatalogApi`] trait:
//! - search, SKU detail, cart and wallet-cart calls (HTTP via `reqwest`)
//! - image proxy and product page links
//! - search listing cards and the category menu model

pub mod api;
pub mod category;
pub mod http;
pub mod image;
pub mod links;
pub mod listing;

pub use api::{CartRequest, CatalogApi, CatalogError, CheckoutSession, SkuDetail, WalletCart};
pub use category::{CategoryMenu, CategoryNode, CATEGORY_TREE};
pub use http::HttpCatalog;
pub use image::{ImageProxy, PLACEHOLDER_IMAGE};
pub use links::product_page_url;
pub use listing::{search_listing, ProductCard, SearchOutcome, SearchQuery};
