//! Instrument photo lookup through the static image manifest.
//!
//! Only photos the manifest lists are shown; anything else gets the
//! placeholder icon instead of a broken `<img>`.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use std::collections::HashMap;

use catalog::Instrument;
use serde::Deserialize;

/// `{ "images": { "<normalized_name>": "<file name>" } }`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageManifest {
    pub images: HashMap<String, String>,
}

impl ImageManifest {
    /// Decode the manifest body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the body is not a manifest object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Photo URL for an instrument, if the manifest lists one.
    #[must_use]
    pub fn photo_url(&self, base_path: &str, normalized_name: &str) -> Option<String> {
        let key = normalized_name.trim();
        if key.is_empty() {
            return None;
        }
        let file = self
            .images
            .get(key)
            .or_else(|| self.images.get(&key.to_lowercase()))?;
        if file.starts_with('/') || file.starts_with("http://") || file.starts_with("https://") {
            return Some(file.clone());
        }
        Some(format!("{}/{}", base_path.trim_end_matches('/'), file))
    }

    /// Resolve photos for each instrument in order.
    #[must_use]
    pub fn resolve_all(&self, base_path: &str, instruments: &[Instrument]) -> Vec<(i64, Option<String>)> {
        instruments
            .iter()
            .map(|inst| (inst.id, self.photo_url(base_path, &inst.normalized_name)))
            .collect()
    }
}
