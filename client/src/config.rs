//! Runtime configuration for the browser client.
//!
//! Defaults target same-origin deployment. A page may override any field by
//! embedding `<meta name="spectral-config" content='{"api_base": "..."}'>`;
//! missing keys keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Name of the `<meta>` tag carrying JSON overrides.
pub const CONFIG_META_NAME: &str = "spectral-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every API path, e.g. `""` or `"https://api.example.org"`.
    pub api_base: String,
    /// Where to send the browser when no valid session exists.
    pub login_url: String,
    /// JSON manifest listing instrument photos that exist.
    pub image_manifest_url: String,
    /// Directory the manifest's file names are relative to.
    pub image_base_path: String,
    /// Delay before a search box change re-filters a list.
    pub search_debounce_ms: u32,
    /// Page size requested from paginated endpoints.
    pub page_size: u32,
    /// Initial map center when a station has no coordinates.
    pub default_center: (f64, f64),
    pub default_zoom: u8,
    /// Use the marker-cluster plugin when it is loaded.
    pub cluster_markers: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            login_url: "/login.html".to_owned(),
            image_manifest_url: "/images/instruments/instrument-images-manifest.json".to_owned(),
            image_base_path: "/images/instruments".to_owned(),
            search_debounce_ms: 300,
            page_size: 20,
            default_center: (62.0, 15.0),
            default_zoom: 5,
            cluster_markers: true,
        }
    }
}

impl ClientConfig {
    /// Apply a JSON override document; invalid JSON leaves defaults intact.
    #[must_use]
    pub fn from_overrides(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring invalid {CONFIG_META_NAME} meta: {e}");
                Self::default()
            }
        }
    }

    /// Read overrides from the page's `<meta>` tag.
    pub fn load() -> Self {
        #[cfg(feature = "csr")]
        {
            let content = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(&format!("meta[name=\"{CONFIG_META_NAME}\"]")).ok().flatten())
                .and_then(|el| el.get_attribute("content"));
            if let Some(raw) = content {
                return Self::from_overrides(&raw);
            }
        }
        Self::default()
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}
