//! Timestamped featured-set cache with a fixed time-to-live.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{Clock, FeaturedSet, SystemClock};

use crate::store::{KeyValueStore, StoreError};

/// Default TTL: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Persisted form: `{"timestamp": <epoch millis>, "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub data: FeaturedSet,
}

pub struct FeaturedCache<S, C = SystemClock> {
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S: KeyValueStore> FeaturedCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> FeaturedCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stored entry under `key`, or `None` when missing, unreadable or
    /// malformed. Failures are logged, never returned.
    pub async fn read(&self, key: &str) -> Option<CacheEntry> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("cache read for {} failed: {}", key, err);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("discarding malformed cache entry {}: {}", key, err);
                None
            }
        }
    }

    /// Persist `data` stamped with the current instant, replacing any prior
    /// entry.
    pub async fn write(&self, key: &str, data: &FeaturedSet) -> Result<(), StoreError> {
        let entry = CacheEntry {
            timestamp: self.clock.now(),
            data: data.clone(),
        };
        let raw = serde_json::to_string(&entry).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.store.put(key, &raw).await?;
        tracing::debug!("cached {} featured products under {}", data.len(), key);
        Ok(())
    }

    /// `now - timestamp < ttl`. Entries stamped in the future count as fresh.
    pub fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match (self.clock.now() - entry.timestamp).to_std() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => true,
        }
    }

    /// Fresh, non-empty cached set. Stale entries are removed.
    pub async fn load_fresh(&self, key: &str) -> Option<FeaturedSet> {
        let entry = self.read(key).await?;

        if !self.is_fresh(&entry) {
            tracing::debug!("cache entry {} expired", key);
            if let Err(err) = self.store.remove(key).await {
                tracing::warn!("failed to remove stale cache entry {}: {}", key, err);
            }
            return None;
        }

        if entry.data.is_empty() {
            return None;
        }

        tracing::debug!("cache hit for {} ({} products)", key, entry.data.len());
        Some(entry.data)
    }
}
