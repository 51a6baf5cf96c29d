//! Persistent key/value storage for the featured-products cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use storefront_core::StorefrontConfig;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("failed to encode cache entry: {0}")]
    Encode(String),
}

/// String key/value storage that survives restarts (or not, for tests).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }
}

/// In-process store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// SQLite-backed store.
///
/// The pool is created lazily on first use so constructing the store never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Store at the configured path, or `{data_dir}/storefront/cache.db`.
    pub fn from_config(config: &StorefrontConfig) -> anyhow::Result<Self> {
        let path = match &config.cache_path {
            Some(path) => path.clone(),
            None => default_cache_path()?,
        };
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn pool(&self) -> anyhow::Result<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create cache directory at {:?}", parent))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite cache at {:?}", self.path))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create kv_entries table")?;

        tracing::debug!("opened SQLite cache at {:?}", self.path);
        *guard = Some(pool.clone());
        Ok(pool)
    }

    async fn pool_or_unavailable(&self) -> Result<SqlitePool, StoreError> {
        self.pool()
            .await
            .map_err(|err| StoreError::Unavailable(format!("{err:#}")))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let pool = self.pool_or_unavailable().await?;

        let row = sqlx::query(
            r#"
            SELECT value
            FROM kv_entries
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let pool = self.pool_or_unavailable().await?;

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let pool = self.pool_or_unavailable().await?;

        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

/// `{app_data_dir}/storefront/cache.db`.
fn default_cache_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("storefront");
    dir.push("cache.db");
    Ok(dir)
}
