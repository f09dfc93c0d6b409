//! Base tile layers.
//!
//! Exactly one base layer is visible. A failed tile is replaced by an inline
//! SVG, and failures are logged with throttling so a dead tile server does
//! not flood the console.

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tiles_test;

use std::collections::HashMap;

use super::{LayerId, MapBackend, MapError};

pub const DEFAULT_LAYER: &str = "osm";

/// Errors logged one by one before switching to summaries.
pub const ERROR_LOG_FIRST: u32 = 3;
/// After the first few, one summary per this many errors.
pub const ERROR_LOG_EVERY: u32 = 100;

/// Grey placeholder tile with a cross, as a data URI.
pub const ERROR_TILE: &str = "data:image/svg+xml;charset=utf-8,\
%3Csvg xmlns='http://www.w3.org/2000/svg' width='256' height='256'%3E\
%3Crect width='256' height='256' fill='%23e5e7eb'/%3E\
%3Cpath d='M112 112l32 32M144 112l-32 32' stroke='%239ca3af' stroke-width='4'/%3E\
%3C/svg%3E";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayerDef {
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

pub const TILE_LAYERS: [TileLayerDef; 3] = [
    TileLayerDef {
        key: "osm",
        name: "Street map",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; OpenStreetMap contributors",
        max_zoom: 19,
    },
    TileLayerDef {
        key: "satellite",
        name: "Satellite",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles &copy; Esri, Maxar, Earthstar Geographics",
        max_zoom: 19,
    },
    TileLayerDef {
        key: "topo",
        name: "Topographic",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "&copy; OpenStreetMap contributors, SRTM | &copy; OpenTopoMap (CC-BY-SA)",
        max_zoom: 17,
    },
];

#[must_use]
pub fn definition(key: &str) -> Option<&'static TileLayerDef> {
    TILE_LAYERS.iter().find(|d| d.key == key)
}

/// Per-layer tile failure count with throttled reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileErrorCounter {
    count: u32,
}

impl TileErrorCounter {
    /// Count one failure; returns the line to log, if this one should be.
    pub fn record(&mut self, layer: &str, tile_url: &str) -> Option<String> {
        self.count += 1;
        if self.count <= ERROR_LOG_FIRST {
            Some(format!("tile load failed on {layer}: {tile_url}"))
        } else if self.count % ERROR_LOG_EVERY == 0 {
            Some(format!("{} tile load failures on {layer} so far", self.count))
        } else {
            None
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Registered base layers and which one is showing.
#[derive(Debug, Default)]
pub struct TileLayerManager {
    layers: HashMap<&'static str, LayerId>,
    active: Option<&'static str>,
}

impl TileLayerManager {
    /// Create every base layer and show `initial` (or the default).
    ///
    /// # Errors
    ///
    /// Propagates the first backend failure.
    pub fn install<B: MapBackend>(&mut self, backend: &mut B, initial: &str) -> Result<(), MapError> {
        for def in &TILE_LAYERS {
            let id = backend.add_tile_layer(def)?;
            self.layers.insert(def.key, id);
        }
        let initial = definition(initial).map_or(DEFAULT_LAYER, |d| d.key);
        self.switch(backend, initial);
        Ok(())
    }

    /// Show `key` instead of the current base layer. Unknown keys are ignored
    /// and reported as `false`.
    pub fn switch<B: MapBackend>(&mut self, backend: &mut B, key: &str) -> bool {
        let Some((&key, &next)) = self.layers.get_key_value(key) else {
            log::warn!("map: unknown base layer {key:?}");
            return false;
        };
        if self.active == Some(key) {
            return true;
        }
        if let Some(current) = self.active.and_then(|k| self.layers.get(k)) {
            backend.hide_layer(*current);
        }
        backend.show_layer(next);
        self.active = Some(key);
        log::debug!("map: base layer {key}");
        true
    }

    #[must_use]
    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.active = None;
    }
}
