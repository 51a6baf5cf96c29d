//! `storefront-featured`
//!
//! **Responsibility:** the featured-products carousel.
//!
//! Pipeline: select one deliverable product per search term, enrich each with
//! SKU detail, cache the result for a fixed TTL, then rotate through it with a
//! carousel that stops after one full pass.
//!
//! The carousel engine is a synchronous state machine over injected [`Timer`]
//! and [`Renderer`] implementations; [`driver`] runs it on tokio.

pub mod cache;
pub mod carousel;
pub mod driver;
pub mod enrich;
pub mod selector;
pub mod store;
pub mod timer;
pub mod widget;

pub use cache::{CacheEntry, FeaturedCache};
pub use carousel::{
    Carousel, CarouselCard, CarouselError, CarouselPhase, CarouselSettings, CarouselSnapshot,
    Renderer,
};
pub use driver::{spawn_carousel, CarouselHandle, TokioTimer};
pub use enrich::enrich;
pub use selector::{pick_featured, search_terms, select_featured};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
pub use timer::{ManualTimer, Timer, TimerId};
pub use widget::{FeaturedWidget, NO_FEATURED_MESSAGE};
