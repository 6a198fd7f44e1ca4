//! Runtime configuration for the enhancement components.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for an `Enhancer` instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceConfig {
    /// Base URL the cart and suggest endpoints are joined onto.
    #[serde(default)]
    pub base_url: String,
    /// Vertical intersection margin for lazy images, in pixels.
    #[serde(default = "default_image_margin")]
    pub image_margin_px: f64,
    /// Vertical intersection margin for lazy iframes, in pixels.
    #[serde(default = "default_iframe_margin")]
    pub iframe_margin_px: f64,
    /// Quiet period before a suggest request is issued.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Minimum query length (in characters) for suggest requests.
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
    /// Trailing debounce window for resize handling.
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Lifetime of a notification before it self-removes.
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
    /// Whether intersection-driven lazy loading is available; when false,
    /// images are resolved eagerly at start.
    #[serde(default = "default_true")]
    pub intersection_supported: bool,
}

fn default_image_margin() -> f64 {
    50.0
}

fn default_iframe_margin() -> f64 {
    100.0
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_search_min_chars() -> usize {
    2
}

fn default_resize_debounce_ms() -> u64 {
    250
}

fn default_notification_ttl_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

impl EnhanceConfig {
    /// Set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search debounce window as a duration.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Resize debounce window as a duration.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Notification lifetime as a duration.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            image_margin_px: default_image_margin(),
            iframe_margin_px: default_iframe_margin(),
            search_debounce_ms: default_search_debounce_ms(),
            search_min_chars: default_search_min_chars(),
            resize_debounce_ms: default_resize_debounce_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            intersection_supported: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = EnhanceConfig::default();
        assert_eq!(config.image_margin_px, 50.0);
        assert_eq!(config.iframe_margin_px, 100.0);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.search_min_chars, 2);
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
        assert_eq!(config.notification_ttl(), Duration::from_millis(3000));
        assert!(config.intersection_supported);
    }

    #[test]
    fn test_with_base_url() {
        let config = EnhanceConfig::default().with_base_url("https://shop.example");
        assert_eq!(config.base_url, "https://shop.example");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EnhanceConfig =
            serde_json::from_str(r#"{"base_url": "https://shop.example"}"#).unwrap();
        assert_eq!(config.base_url, "https://shop.example");
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.notification_ttl_ms, 3000);
    }
}
