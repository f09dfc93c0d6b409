//! In-memory [`MapBackend`] that records every call.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::tiles::TileLayerDef;
use super::{Bounds, LatLng, LayerId, MapBackend, MapError, MarkerSpec, PathStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    CreateMap(String),
    Tile(&'static str),
    Group { clustered: bool },
    Marker { group: LayerId, tooltip: Option<String> },
    GeoJson { group: LayerId, color: String },
    Show(LayerId),
    Hide(LayerId),
    Remove(LayerId),
    SetView(LatLng, u8),
    FitBounds(Bounds, u8),
    Destroy,
}

#[derive(Debug)]
pub struct RecordingBackend {
    pub library: bool,
    pub cluster_plugin: bool,
    pub missing_container: bool,
    /// Make `create_group` fail.
    pub fail_groups: bool,
    pub ops: Vec<Op>,
    next: u32,
    tiles: HashMap<LayerId, &'static str>,
    visible: HashSet<LayerId>,
    live: HashSet<LayerId>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            library: true,
            cluster_plugin: true,
            missing_container: false,
            fail_groups: false,
            ops: Vec::new(),
            next: 0,
            tiles: HashMap::new(),
            visible: HashSet::new(),
            live: HashSet::new(),
        }
    }
}

impl RecordingBackend {
    pub fn without_library() -> Self {
        Self {
            library: false,
            ..Self::default()
        }
    }

    pub fn without_cluster_plugin() -> Self {
        Self {
            cluster_plugin: false,
            ..Self::default()
        }
    }

    pub fn with_missing_container() -> Self {
        Self {
            missing_container: true,
            ..Self::default()
        }
    }

    pub fn with_failing_groups() -> Self {
        Self {
            fail_groups: true,
            ..Self::default()
        }
    }

    fn issue(&mut self) -> LayerId {
        self.next += 1;
        let id = LayerId(self.next);
        self.live.insert(id);
        id
    }

    pub fn visible_tile_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .tiles
            .iter()
            .filter(|(id, _)| self.visible.contains(id))
            .map(|(_, key)| *key)
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        self.visible.contains(&id)
    }

    pub fn is_live(&self, id: LayerId) -> bool {
        self.live.contains(&id)
    }

    pub fn markers(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Marker { .. })).count()
    }
}

impl MapBackend for RecordingBackend {
    fn library_available(&self) -> bool {
        self.library
    }

    fn cluster_plugin_available(&self) -> bool {
        self.cluster_plugin
    }

    fn create_map(&mut self, container_id: &str, _center: LatLng, _zoom: u8) -> Result<(), MapError> {
        if self.missing_container {
            return Err(MapError::ContainerMissing(container_id.to_owned()));
        }
        self.ops.push(Op::CreateMap(container_id.to_owned()));
        Ok(())
    }

    fn add_tile_layer(&mut self, def: &TileLayerDef) -> Result<LayerId, MapError> {
        let id = self.issue();
        self.tiles.insert(id, def.key);
        self.ops.push(Op::Tile(def.key));
        Ok(id)
    }

    fn create_group(&mut self, clustered: bool) -> Result<LayerId, MapError> {
        if self.fail_groups {
            return Err(MapError::Backend("layer group rejected".to_owned()));
        }
        let id = self.issue();
        self.visible.insert(id);
        self.ops.push(Op::Group { clustered });
        Ok(id)
    }

    fn add_marker(&mut self, group: LayerId, marker: &MarkerSpec) -> Result<LayerId, MapError> {
        let id = self.issue();
        self.ops.push(Op::Marker {
            group,
            tooltip: marker.tooltip.clone(),
        });
        Ok(id)
    }

    fn add_geojson(
        &mut self,
        group: LayerId,
        _feature: &Value,
        style: &PathStyle,
        _popup_html: Option<&str>,
        _tooltip: Option<&str>,
    ) -> Result<LayerId, MapError> {
        let id = self.issue();
        self.ops.push(Op::GeoJson {
            group,
            color: style.color.clone(),
        });
        Ok(id)
    }

    fn show_layer(&mut self, layer: LayerId) {
        self.visible.insert(layer);
        self.ops.push(Op::Show(layer));
    }

    fn hide_layer(&mut self, layer: LayerId) {
        self.visible.remove(&layer);
        self.ops.push(Op::Hide(layer));
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.visible.remove(&layer);
        self.live.remove(&layer);
        self.ops.push(Op::Remove(layer));
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.ops.push(Op::SetView(center, zoom));
    }

    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8) {
        self.ops.push(Op::FitBounds(bounds, max_zoom));
    }

    fn destroy(&mut self) {
        self.live.clear();
        self.visible.clear();
        self.ops.push(Op::Destroy);
    }
}
