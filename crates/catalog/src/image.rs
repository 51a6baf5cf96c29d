//! Image references are always rewritten through the backend proxy before
//! display so third-party hosts never see the storefront as referrer.

/// Shown when a product has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProxy {
    endpoint: String,
}

impl ImageProxy {
    /// Proxy served by the backend at `{api_base}/image-proxy`.
    pub fn new(api_base: &str) -> Self {
        Self {
            endpoint: format!("{}/image-proxy", api_base.trim_end_matches('/')),
        }
    }

    pub fn proxy(&self, url: &str) -> String {
        format!("{}?url={}", self.endpoint, urlencoding::encode(url))
    }

    /// Proxied URL, or the placeholder for a missing/blank reference.
    pub fn proxy_or_placeholder(&self, url: Option<&str>) -> String {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => self.proxy(url),
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}
