//! Facade over the map managers.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use catalog::{Instrument, Platform, Station, TaxonomyProvider};
use serde_json::Value;

use super::geojson::{GeoJsonLayerManager, GeoKind};
use super::markers::{self, MarkerKind, MarkerManager};
use super::tiles::TileLayerManager;
use super::{Bounds, LatLng, MapBackend, MapError, MapOptions};

/// Zoom used when every marker sits on one spot.
pub const SINGLE_MARKER_ZOOM: u8 = 14;
/// Upper bound for [`MapController::fit_to_markers`].
pub const FIT_MAX_ZOOM: u8 = 16;

pub struct MapController<B: MapBackend> {
    backend: B,
    tiles: TileLayerManager,
    markers: MarkerManager,
    overlays: GeoJsonLayerManager,
    ready: bool,
}

impl<B: MapBackend> MapController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tiles: TileLayerManager::default(),
            markers: MarkerManager::default(),
            overlays: GeoJsonLayerManager::default(),
            ready: false,
        }
    }

    /// Create the map, its base layers and the marker group.
    ///
    /// # Errors
    ///
    /// [`MapError::LibraryMissing`] when Leaflet is absent, otherwise
    /// whatever the backend reports.
    pub fn initialize(&mut self, container_id: &str, options: &MapOptions) -> Result<(), MapError> {
        if self.ready {
            self.destroy();
        }
        if !self.backend.library_available() {
            return Err(MapError::LibraryMissing);
        }
        self.backend.create_map(container_id, options.center, options.zoom)?;
        let installed = self
            .tiles
            .install(&mut self.backend, &options.base_layer)
            .and_then(|()| self.markers.install(&mut self.backend, options.cluster_markers));
        if let Err(e) = installed {
            log::warn!("map: setup in #{container_id} failed: {e}");
            self.backend.destroy();
            self.markers.forget();
            self.tiles.clear();
            return Err(e);
        }
        self.ready = true;
        log::info!("map: initialized in #{container_id}");
        Ok(())
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns whether a marker was placed.
    ///
    /// # Errors
    ///
    /// Backend failures, or a call before [`Self::initialize`].
    pub fn add_station_marker(&mut self, station: &Station) -> Result<bool, MapError> {
        let Some(spec) = markers::station_marker(station) else {
            log::debug!("map: station {} has no coordinates", station.acronym);
            return Ok(false);
        };
        self.markers
            .put(&mut self.backend, MarkerKind::Station.key(station.id), &spec)?;
        Ok(true)
    }

    /// Returns how many platforms were placed; ones without coordinates are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Backend failures, or a call before [`Self::initialize`].
    pub fn add_platform_markers(
        &mut self,
        platforms: &[Platform],
        taxonomy: &dyn TaxonomyProvider,
    ) -> Result<usize, MapError> {
        let mut placed = 0;
        for platform in platforms {
            if let Some(spec) = markers::platform_marker(platform, taxonomy) {
                self.markers
                    .put(&mut self.backend, MarkerKind::Platform.key(platform.id), &spec)?;
                placed += 1;
            }
        }
        Ok(placed)
    }

    /// # Errors
    ///
    /// Backend failures, or a call before [`Self::initialize`].
    pub fn add_instrument_markers(
        &mut self,
        instruments: &[Instrument],
        taxonomy: &dyn TaxonomyProvider,
    ) -> Result<usize, MapError> {
        let mut placed = 0;
        for instrument in instruments {
            if let Some(spec) = markers::instrument_marker(instrument, taxonomy) {
                self.markers
                    .put(&mut self.backend, MarkerKind::Instrument.key(instrument.id), &spec)?;
                placed += 1;
            }
        }
        Ok(placed)
    }

    /// Draw `data` into the overlay group `name`.
    ///
    /// # Errors
    ///
    /// Backend failures, or a call before [`Self::initialize`].
    pub fn add_geojson_layer(&mut self, name: &str, kind: GeoKind, data: &Value) -> Result<usize, MapError> {
        if !self.ready {
            return Err(MapError::Backend("map is not initialized".to_owned()));
        }
        self.overlays.add(&mut self.backend, name, kind, data)
    }

    pub fn set_layer_group_visible(&mut self, name: &str, visible: bool) -> bool {
        self.overlays.set_visible(&mut self.backend, name, visible)
    }

    pub fn switch_base_layer(&mut self, key: &str) -> bool {
        self.ready && self.tiles.switch(&mut self.backend, key)
    }

    #[must_use]
    pub fn base_layer(&self) -> Option<&'static str> {
        self.tiles.active()
    }

    pub fn clear_all_markers(&mut self) {
        self.markers.clear(&mut self.backend);
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Frame every marker. Returns `false` when there are none.
    pub fn fit_to_markers(&mut self) -> bool {
        let Some(bounds) = Bounds::around(self.markers.positions()) else {
            return false;
        };
        if bounds.is_point() {
            self.backend.set_view(bounds.south_west, SINGLE_MARKER_ZOOM);
        } else {
            self.backend.fit_bounds(bounds, FIT_MAX_ZOOM);
        }
        true
    }

    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        if self.ready {
            self.backend.set_view(center, zoom);
        }
    }

    /// Tear the map down; the controller can be initialized again.
    pub fn destroy(&mut self) {
        if !self.ready {
            return;
        }
        self.backend.destroy();
        self.markers.forget();
        self.overlays.forget();
        self.tiles.clear();
        self.ready = false;
        log::debug!("map: destroyed");
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }
}
