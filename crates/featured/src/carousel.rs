//! Carousel engine: rotation state, transitions and rendering.
//!
//! Every transition runs to completion synchronously, so the advance timer
//! recorded in the state always matches the phase. Firings from timers that
//! were cancelled after being queued are recognised by id and dropped.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use storefront_catalog::{product_page_url, ImageProxy, PLACEHOLDER_IMAGE};
use storefront_core::{FeaturedSet, Product, StorefrontConfig};

use crate::timer::{ManualTimer, Timer, TimerId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselPhase {
    /// Not started, stopped, or auto-stopped after a full pass.
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("no featured products to show")]
    Empty,
    #[error("carousel is no longer running")]
    Stopped,
}

/// What the renderer shows for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselCard {
    pub index: usize,
    pub title: String,
    /// `$` and two decimals.
    pub price: String,
    pub delivery: String,
    /// Proxied display image, or the proxied placeholder.
    pub image: String,
    /// Relative product page link.
    pub link: String,
}

impl CarouselCard {
    pub fn from_product(index: usize, product: &Product, proxy: &ImageProxy) -> Self {
        Self {
            index,
            title: product.title.clone(),
            price: format!("${}", product.price),
            delivery: product.delivery().label(),
            image: proxy.proxy(product.display_image().unwrap_or(PLACEHOLDER_IMAGE)),
            link: product_page_url(product, proxy),
        }
    }
}

/// Output side of the carousel.
pub trait Renderer {
    /// Start hiding the current card; a `present` follows after the fade delay.
    fn fade_out(&mut self) {}

    /// Replace the content with `card` and show it.
    fn present(&mut self, card: &CarouselCard);

    /// Replace the content with a plain message (nothing to rotate).
    fn show_message(&mut self, message: &str);

    /// Pause control indicator changed.
    fn set_paused(&mut self, _paused: bool) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn fade_out(&mut self) {
        (**self).fade_out()
    }

    fn present(&mut self, card: &CarouselCard) {
        (**self).present(card)
    }

    fn show_message(&mut self, message: &str) {
        (**self).show_message(message)
    }

    fn set_paused(&mut self, paused: bool) {
        (**self).set_paused(paused)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CarouselSettings {
    /// Auto-advance period.
    pub interval: Duration,
    /// Delay between fade-out and the content swap.
    pub fade: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            fade: Duration::from_millis(400),
        }
    }
}

impl CarouselSettings {
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            interval: config.carousel_interval,
            fade: config.fade_delay,
        }
    }
}

/// Point-in-time view of the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub len: usize,
    pub phase: CarouselPhase,
}

#[derive(Debug)]
struct CarouselState {
    current_index: usize,
    phase: CarouselPhase,
    advance: Option<TimerId>,
}

pub struct Carousel<T, R> {
    featured: FeaturedSet,
    proxy: ImageProxy,
    settings: CarouselSettings,
    state: CarouselState,
    /// Scheduled content swaps and the index each one shows.
    pending: HashMap<TimerId, usize>,
    timer: T,
    renderer: R,
}

impl<T: Timer, R: Renderer> Carousel<T, R> {
    /// A carousel refuses to exist over an empty set; callers render the
    /// empty state themselves.
    pub fn new(
        featured: FeaturedSet,
        proxy: ImageProxy,
        settings: CarouselSettings,
        timer: T,
        renderer: R,
    ) -> Result<Self, CarouselError> {
        if featured.is_empty() {
            return Err(CarouselError::Empty);
        }

        Ok(Self {
            featured,
            proxy,
            settings,
            state: CarouselState {
                current_index: 0,
                phase: CarouselPhase::Idle,
                advance: None,
            },
            pending: HashMap::new(),
            timer,
            renderer,
        })
    }

    pub fn len(&self) -> usize {
        self.featured.len()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn phase(&self) -> CarouselPhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.state.current_index,
            len: self.featured.len(),
            phase: self.state.phase,
        }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Begin auto-advancing from the current index. Restarting replaces the
    /// previous advance timer.
    pub fn start(&mut self) {
        self.arm();
        tracing::info!(
            "carousel started at {} of {}",
            self.state.current_index,
            self.featured.len()
        );
        self.render(self.state.current_index);
    }

    pub fn next(&mut self) {
        self.state.current_index = (self.state.current_index + 1) % self.featured.len();
        self.render(self.state.current_index);
    }

    pub fn prev(&mut self) {
        let len = self.featured.len();
        self.state.current_index = (self.state.current_index + len - 1) % len;
        self.render(self.state.current_index);
    }

    /// Playing pauses; Paused and Idle go the other way round. An Idle
    /// carousel becomes Paused, so the next toggle plays again.
    pub fn toggle_pause(&mut self) -> CarouselPhase {
        match self.state.phase {
            CarouselPhase::Playing => {
                self.disarm();
                self.state.phase = CarouselPhase::Paused;
                self.renderer.set_paused(true);
            }
            CarouselPhase::Paused => {
                self.arm();
                self.renderer.set_paused(false);
            }
            CarouselPhase::Idle => {
                self.state.phase = CarouselPhase::Paused;
                self.renderer.set_paused(true);
            }
        }
        tracing::debug!("carousel toggled to {:?}", self.state.phase);
        self.state.phase
    }

    /// Cancel the advance timer and any pending content swaps.
    pub fn stop(&mut self) {
        self.disarm();
        for (id, _) in self.pending.drain() {
            self.timer.cancel(id);
        }
        self.state.phase = CarouselPhase::Idle;
    }

    /// Dispatch a timer firing. Unknown ids are stale and ignored.
    pub fn fire(&mut self, id: TimerId) {
        if self.state.advance == Some(id) {
            self.tick();
        } else if let Some(index) = self.pending.remove(&id) {
            if let Some(product) = self.featured.get(index) {
                let card = CarouselCard::from_product(index, product, &self.proxy);
                self.renderer.present(&card);
            }
        } else {
            tracing::debug!("ignoring stale {}", id);
        }
    }

    fn tick(&mut self) {
        if self.state.phase != CarouselPhase::Playing {
            return;
        }

        self.state.current_index = (self.state.current_index + 1) % self.featured.len();
        self.render(self.state.current_index);

        if self.state.current_index == 0 {
            self.disarm();
            self.state.phase = CarouselPhase::Idle;
            tracing::info!("carousel completed a full pass, stopping");
        }
    }

    fn arm(&mut self) {
        self.disarm();
        self.state.advance = Some(self.timer.every(self.settings.interval));
        self.state.phase = CarouselPhase::Playing;
    }

    fn disarm(&mut self) {
        if let Some(id) = self.state.advance.take() {
            self.timer.cancel(id);
        }
    }

    fn render(&mut self, index: usize) {
        self.renderer.fade_out();
        let id = self.timer.after(self.settings.fade);
        self.pending.insert(id, index);
    }
}

impl<R: Renderer> Carousel<ManualTimer, R> {
    /// Advance virtual time by `by`, firing everything that falls due.
    pub fn advance_by(&mut self, by: Duration) {
        let until = self.timer.now() + by;
        while let Some(id) = self.timer.pop_due(until) {
            self.fire(id);
        }
        self.timer.set_now(until);
    }
}
