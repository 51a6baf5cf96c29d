//! Entry point: load the featured set (cache first) and start the carousel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use storefront_catalog::{CatalogApi, ImageProxy};
use storefront_core::{Clock, FeaturedSet, StorefrontConfig, SystemClock};

use crate::cache::FeaturedCache;
use crate::carousel::{CarouselSettings, Renderer};
use crate::driver::{spawn_carousel, CarouselHandle};
use crate::enrich::enrich;
use crate::selector::select_featured;
use crate::store::KeyValueStore;

pub const NO_FEATURED_MESSAGE: &str = "No featured products found.";

pub struct FeaturedWidget<A, S, C = SystemClock> {
    api: A,
    cache: FeaturedCache<S, C>,
    cache_key: String,
    terms: Vec<String>,
    proxy: ImageProxy,
    settings: CarouselSettings,
}

impl<A, S, C> FeaturedWidget<A, S, C>
where
    A: CatalogApi,
    S: KeyValueStore,
    C: Clock,
{
    /// Terms, cache key, TTL and carousel timing come from `config`.
    pub fn new(api: A, cache: FeaturedCache<S, C>, config: &StorefrontConfig) -> Self {
        Self {
            api,
            cache: cache.with_ttl(config.cache_ttl),
            cache_key: config.cache_key.clone(),
            terms: config.featured_terms.clone(),
            proxy: ImageProxy::new(&config.api_base),
            settings: CarouselSettings::from_config(config),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &FeaturedCache<S, C> {
        &self.cache
    }

    /// Fresh cached set, or a newly selected and enriched one.
    ///
    /// Never fails: every backend or storage problem is logged and degrades to
    /// fewer (possibly zero) products. Empty sets are not cached.
    pub async fn load_featured(&self) -> FeaturedSet {
        let mut rng = StdRng::from_entropy();
        self.load_featured_with(&mut rng).await
    }

    pub async fn load_featured_with<R>(&self, rng: &mut R) -> FeaturedSet
    where
        R: Rng + Send + ?Sized,
    {
        if let Some(cached) = self.cache.load_fresh(&self.cache_key).await {
            return cached;
        }

        let selected = select_featured(&self.api, &self.terms, rng).await;
        if selected.is_empty() {
            tracing::warn!("no featured products available for {} terms", self.terms.len());
            return selected;
        }

        let featured = enrich(&self.api, selected).await;
        if let Err(err) = self.cache.write(&self.cache_key, &featured).await {
            tracing::warn!("failed to cache featured products: {}", err);
        }
        featured
    }

    /// Load the featured set and start the carousel on `renderer`.
    ///
    /// Returns `None` after showing [`NO_FEATURED_MESSAGE`] when there is
    /// nothing to rotate.
    pub async fn init<R>(&self, mut renderer: R) -> Option<CarouselHandle>
    where
        R: Renderer + Send + 'static,
    {
        let featured = self.load_featured().await;
        if featured.is_empty() {
            renderer.show_message(NO_FEATURED_MESSAGE);
            return None;
        }

        match spawn_carousel(featured, self.proxy.clone(), self.settings, renderer) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!("failed to start featured carousel: {}", err);
                None
            }
        }
    }
}
