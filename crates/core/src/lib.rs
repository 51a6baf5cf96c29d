//! `storefront-core`: storefront domain building blocks.
//!
//! This crate contains the **pure** product model shared by the catalog,
//! checkout and featured-products crates (no I/O).

pub mod clock;
pub mod config;
pub mod delivery;
pub mod error;
pub mod id;
pub mod money;
pub mod product;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, LogFormat, StorefrontConfig};
pub use delivery::{DeliveryDays, DeliveryEstimate};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SkuId};
pub use money::Money;
pub use product::{FeaturedSet, Product};
