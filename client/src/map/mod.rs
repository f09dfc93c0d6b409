//! Interactive map: tile layers, entity markers and GeoJSON overlays.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`controller::MapController`] is the only public surface. It drives three
//! managers (tiles, markers, GeoJSON) which in turn talk to a [`MapBackend`].
//! The browser backend wraps Leaflet (`window.L`); tests use a recording
//! backend, so everything above the backend is plain Rust.
//!
//! Layer objects live inside the backend and are referred to by [`LayerId`].

pub mod controller;
pub mod geojson;
#[cfg(feature = "csr")]
pub mod leaflet;
pub mod markers;
pub mod tiles;

#[cfg(test)]
pub(crate) mod recording;

use serde_json::Value;

use crate::config::ClientConfig;

pub use controller::MapController;

/// Map failures surfaced to the view.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map container #{0} not found")]
    ContainerMissing(String),
    #[error("the Leaflet mapping library is not loaded")]
    LibraryMissing,
    #[error("map error: {0}")]
    Backend(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// A position from optional coordinates; both must be present and in range.
    #[must_use]
    pub fn from_optional(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }
}

/// Axis-aligned box around a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest box containing every point; `None` for no points.
    pub fn around(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
        }
        Some(bounds)
    }

    /// Whether the box has collapsed to one point.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }
}

/// Handle to a layer owned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// Settings for [`MapController::initialize`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub base_layer: String,
    pub cluster_markers: bool,
}

impl MapOptions {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            center: LatLng::new(config.default_center.0, config.default_center.1),
            zoom: config.default_zoom,
            base_layer: tiles::DEFAULT_LAYER.to_owned(),
            cluster_markers: config.cluster_markers,
        }
    }
}

/// A marker ready for the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub icon_html: String,
    pub icon_size: (u32, u32),
    pub popup_html: Option<String>,
    pub tooltip: Option<String>,
}

/// Stroke and fill for a GeoJSON path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub dash_array: Option<String>,
}

/// Low-level map operations. Implemented by Leaflet in the browser.
pub trait MapBackend {
    fn library_available(&self) -> bool;

    fn cluster_plugin_available(&self) -> bool;

    /// Create the map inside the element with id `container_id`.
    ///
    /// # Errors
    ///
    /// [`MapError::ContainerMissing`] when no such element exists, or
    /// [`MapError::Backend`] when the library rejects it.
    fn create_map(&mut self, container_id: &str, center: LatLng, zoom: u8) -> Result<(), MapError>;

    /// Add a tile layer (hidden until shown) with error-tile substitution.
    ///
    /// # Errors
    ///
    /// [`MapError::Backend`] when the layer cannot be created.
    fn add_tile_layer(&mut self, def: &tiles::TileLayerDef) -> Result<LayerId, MapError>;

    /// Create an empty marker or overlay group, shown on the map.
    ///
    /// # Errors
    ///
    /// [`MapError::Backend`] when the group cannot be created.
    fn create_group(&mut self, clustered: bool) -> Result<LayerId, MapError>;

    /// # Errors
    ///
    /// [`MapError::Backend`] when the marker cannot be created.
    fn add_marker(&mut self, group: LayerId, marker: &MarkerSpec) -> Result<LayerId, MapError>;

    /// Add one GeoJSON feature to `group`.
    ///
    /// # Errors
    ///
    /// [`MapError::Backend`] when the library rejects the feature.
    fn add_geojson(
        &mut self,
        group: LayerId,
        feature: &Value,
        style: &PathStyle,
        popup_html: Option<&str>,
        tooltip: Option<&str>,
    ) -> Result<LayerId, MapError>;

    fn show_layer(&mut self, layer: LayerId);

    fn hide_layer(&mut self, layer: LayerId);

    /// Remove a layer from its group (or the map) and forget it.
    fn remove_layer(&mut self, layer: LayerId);

    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8);

    fn destroy(&mut self);
}
