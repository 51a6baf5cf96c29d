//! Runtime configuration, read from `STOREFRONT_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://acashmarketplace-backend.onrender.com/api";
pub const DEFAULT_WALLET_DAPP_URL: &str =
    "https://metamask.app.link/dapp/bigfoe313.github.io/shoppingcart/";
pub const DEFAULT_CACHE_KEY: &str = "featuredProductsCache";
pub const DEFAULT_FEATURED_TERMS: [&str; 5] = [
    "Smart Glasses",
    "Smart Watch",
    "Laptop Computer",
    "Earphones & Headphones",
    "Mobile Phone",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("expected json or pretty, got {other}")),
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Backend API base, without trailing slash (e.g. `https://host/api`).
    pub api_base: String,
    /// Wallet deep-link target used by the crypto checkout.
    pub wallet_dapp_url: String,
    /// Search terms feeding the featured carousel, in display order.
    pub featured_terms: Vec<String>,
    pub cache_key: String,
    pub cache_ttl: Duration,
    pub carousel_interval: Duration,
    pub fade_delay: Duration,
    /// SQLite cache file; `None` uses the OS data directory.
    pub cache_path: Option<PathBuf>,
    pub http_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            wallet_dapp_url: DEFAULT_WALLET_DAPP_URL.to_string(),
            featured_terms: DEFAULT_FEATURED_TERMS.iter().map(|t| t.to_string()).collect(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_ttl: Duration::from_secs(5 * 60),
            carousel_interval: Duration::from_millis(5000),
            fade_delay: Duration::from_millis(400),
            cache_path: None,
            http_timeout: None,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (unset keys keep their defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base) = get("STOREFRONT_API_BASE") {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(url) = get("STOREFRONT_WALLET_DAPP_URL") {
            config.wallet_dapp_url = url.trim().to_string();
        }
        if let Some(terms) = get("STOREFRONT_FEATURED_TERMS") {
            config.featured_terms = terms
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(key) = get("STOREFRONT_CACHE_KEY") {
            config.cache_key = key;
        }
        if let Some(raw) = get("STOREFRONT_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse("STOREFRONT_CACHE_TTL_SECS", &raw)?);
        }
        if let Some(raw) = get("STOREFRONT_CAROUSEL_INTERVAL_MS") {
            let ms: u64 = parse("STOREFRONT_CAROUSEL_INTERVAL_MS", &raw)?;
            if ms == 0 {
                return Err(invalid("STOREFRONT_CAROUSEL_INTERVAL_MS", &raw, "must be positive"));
            }
            config.carousel_interval = Duration::from_millis(ms);
        }
        if let Some(raw) = get("STOREFRONT_FADE_MS") {
            config.fade_delay = Duration::from_millis(parse("STOREFRONT_FADE_MS", &raw)?);
        }
        if let Some(path) = get("STOREFRONT_CACHE_PATH") {
            config.cache_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = get("STOREFRONT_HTTP_TIMEOUT_SECS") {
            config.http_timeout =
                Some(Duration::from_secs(parse("STOREFRONT_HTTP_TIMEOUT_SECS", &raw)?));
        }
        if let Some(raw) = get("STOREFRONT_LOG_FORMAT") {
            config.log_format = raw
                .parse()
                .map_err(|reason: String| invalid("STOREFRONT_LOG_FORMAT", &raw, &reason))?;
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, raw, &e.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.featured_terms.len(), 5);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn overrides_from_environment() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_API_BASE", "http://127.0.0.1:9000/api/"),
            ("STOREFRONT_FEATURED_TERMS", "Lamps | Desks||"),
            ("STOREFRONT_CAROUSEL_INTERVAL_MS", "1000"),
            ("STOREFRONT_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.api_base, "http://127.0.0.1:9000/api");
        assert_eq!(config.featured_terms, vec!["Lamps", "Desks"]);
        assert_eq!(config.carousel_interval, Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_CACHE_TTL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STOREFRONT_CACHE_TTL_SECS", .. }));

        assert!(
            StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_CAROUSEL_INTERVAL_MS", "0")]))
                .is_err()
        );
    }
}
