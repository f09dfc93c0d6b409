//! [`MapBackend`] over the global Leaflet object (`window.L`).
//!
//! Leaflet is loaded by a script tag, so there are no typed bindings; calls
//! go through `js_sys::Reflect`. Layer objects are kept in a table keyed by
//! [`LayerId`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function, JSON, Object, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::tiles::{ERROR_TILE, TileErrorCounter, TileLayerDef};
use super::{Bounds, LatLng, LayerId, MapBackend, MapError, MarkerSpec, PathStyle};

const FIT_PADDING_PX: f64 = 24.0;

fn js_err(context: &str, err: &JsValue) -> MapError {
    MapError::Backend(format!("{context}: {err:?}"))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, MapError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| js_err(key, &e))
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, MapError> {
    let func = get(target, method)?
        .dyn_into::<Function>()
        .map_err(|e| js_err(method, &e))?;
    let args: Array = args.iter().collect();
    func.apply(target, &args).map_err(|e| js_err(method, &e))
}

fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in entries {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

fn lat_lng(p: LatLng) -> JsValue {
    [JsValue::from_f64(p.lat), JsValue::from_f64(p.lng)]
        .iter()
        .collect::<Array>()
        .into()
}

fn pair(a: f64, b: f64) -> JsValue {
    [JsValue::from_f64(a), JsValue::from_f64(b)].iter().collect::<Array>().into()
}

fn leaflet() -> Option<JsValue> {
    let l = Reflect::get(&js_sys::global(), &JsValue::from_str("L")).ok()?;
    l.is_object().then_some(l)
}

#[derive(Default)]
pub struct LeafletBackend {
    map: Option<JsValue>,
    layers: HashMap<LayerId, JsValue>,
    parents: HashMap<LayerId, LayerId>,
    next: u32,
    tile_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl LeafletBackend {
    fn lib(&self) -> Result<JsValue, MapError> {
        leaflet().ok_or(MapError::LibraryMissing)
    }

    fn map(&self) -> Result<&JsValue, MapError> {
        self.map
            .as_ref()
            .ok_or_else(|| MapError::Backend("map is not created".to_owned()))
    }

    fn register(&mut self, layer: JsValue, parent: Option<LayerId>) -> LayerId {
        self.next += 1;
        let id = LayerId(self.next);
        self.layers.insert(id, layer);
        if let Some(parent) = parent {
            self.parents.insert(id, parent);
        }
        id
    }

    fn layer(&self, id: LayerId) -> Result<&JsValue, MapError> {
        self.layers
            .get(&id)
            .ok_or_else(|| MapError::Backend(format!("unknown layer {}", id.0)))
    }

    fn add_to_group(&mut self, group: LayerId, layer: JsValue) -> Result<LayerId, MapError> {
        call(self.layer(group)?, "addLayer", &[layer.clone()])?;
        Ok(self.register(layer, Some(group)))
    }

    fn map_call(&self, method: &str, args: &[JsValue]) {
        if let Err(err) = self.map().and_then(|map| call(map, method, args)) {
            log::warn!("map: {err}");
        }
    }
}

fn bind_popup_and_tooltip(layer: &JsValue, popup: Option<&str>, tooltip: Option<&str>) -> Result<(), MapError> {
    if let Some(html) = popup {
        call(layer, "bindPopup", &[JsValue::from_str(html)])?;
    }
    if let Some(text) = tooltip {
        // Tooltip content is HTML too.
        let text = crate::util::escape::html(text);
        call(
            layer,
            "bindTooltip",
            &[JsValue::from_str(&text), object(&[("sticky", JsValue::TRUE)])],
        )?;
    }
    Ok(())
}

impl MapBackend for LeafletBackend {
    fn library_available(&self) -> bool {
        leaflet().is_some()
    }

    fn cluster_plugin_available(&self) -> bool {
        leaflet()
            .and_then(|l| get(&l, "markerClusterGroup").ok())
            .is_some_and(|f| f.is_function())
    }

    fn create_map(&mut self, container_id: &str, center: LatLng, zoom: u8) -> Result<(), MapError> {
        let l = self.lib()?;
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or_else(|| MapError::ContainerMissing(container_id.to_owned()))?;
        let map = call(&l, "map", &[element.into(), object(&[("zoomControl", JsValue::TRUE)])])?;
        call(&map, "setView", &[lat_lng(center), JsValue::from(zoom)])?;
        self.map = Some(map);
        Ok(())
    }

    fn add_tile_layer(&mut self, def: &TileLayerDef) -> Result<LayerId, MapError> {
        let l = self.lib()?;
        let options = object(&[
            ("attribution", JsValue::from_str(def.attribution)),
            ("maxZoom", JsValue::from(def.max_zoom)),
            ("errorTileUrl", JsValue::from_str(ERROR_TILE)),
        ]);
        let layer = call(&l, "tileLayer", &[JsValue::from_str(def.url), options])?;

        let counter = Rc::new(RefCell::new(TileErrorCounter::default()));
        let key = def.key;
        let handler = Closure::wrap(Box::new(move |event: JsValue| {
            let tile = Reflect::get(&event, &JsValue::from_str("tile")).unwrap_or(JsValue::UNDEFINED);
            let src = Reflect::get(&tile, &JsValue::from_str("src"))
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_default();
            if src != ERROR_TILE && tile.is_object() {
                let _ = Reflect::set(&tile, &JsValue::from_str("src"), &JsValue::from_str(ERROR_TILE));
            }
            if let Some(line) = counter.borrow_mut().record(key, &src) {
                log::warn!("map: {line}");
            }
        }) as Box<dyn FnMut(JsValue)>);
        call(
            &layer,
            "on",
            &[JsValue::from_str("tileerror"), handler.as_ref().clone()],
        )?;
        self.tile_handlers.push(handler);
        Ok(self.register(layer, None))
    }

    fn create_group(&mut self, clustered: bool) -> Result<LayerId, MapError> {
        let l = self.lib()?;
        let group = if clustered {
            call(&l, "markerClusterGroup", &[object(&[("showCoverageOnHover", JsValue::FALSE)])])?
        } else {
            call(&l, "layerGroup", &[])?
        };
        call(self.map()?, "addLayer", &[group.clone()])?;
        Ok(self.register(group, None))
    }

    fn add_marker(&mut self, group: LayerId, marker: &MarkerSpec) -> Result<LayerId, MapError> {
        let l = self.lib()?;
        let (w, h) = marker.icon_size;
        let (w, h) = (f64::from(w), f64::from(h));
        let icon = call(
            &l,
            "divIcon",
            &[object(&[
                ("html", JsValue::from_str(&marker.icon_html)),
                ("className", JsValue::from_str("map-pin-icon")),
                ("iconSize", pair(w, h)),
                ("iconAnchor", pair(w / 2.0, h)),
                ("popupAnchor", pair(0.0, -h)),
            ])],
        )?;
        let layer = call(&l, "marker", &[lat_lng(marker.position), object(&[("icon", icon)])])?;
        bind_popup_and_tooltip(&layer, marker.popup_html.as_deref(), marker.tooltip.as_deref())?;
        self.add_to_group(group, layer)
    }

    fn add_geojson(
        &mut self,
        group: LayerId,
        feature: &Value,
        style: &PathStyle,
        popup_html: Option<&str>,
        tooltip: Option<&str>,
    ) -> Result<LayerId, MapError> {
        let l = self.lib()?;
        let data = JSON::parse(&feature.to_string()).map_err(|e| js_err("geojson", &e))?;
        let mut entries = vec![
            ("color", JsValue::from_str(&style.color)),
            ("weight", JsValue::from_f64(style.weight)),
            ("opacity", JsValue::from_f64(style.opacity)),
            ("fillColor", JsValue::from_str(&style.fill_color)),
            ("fillOpacity", JsValue::from_f64(style.fill_opacity)),
        ];
        if let Some(dash) = &style.dash_array {
            entries.push(("dashArray", JsValue::from_str(dash)));
        }
        let options = object(&[("style", object(&entries))]);
        let layer = call(&l, "geoJSON", &[data, options])?;
        bind_popup_and_tooltip(&layer, popup_html, tooltip)?;
        self.add_to_group(group, layer)
    }

    fn show_layer(&mut self, layer: LayerId) {
        if let Ok(layer) = self.layer(layer) {
            self.map_call("addLayer", &[layer.clone()]);
        }
    }

    fn hide_layer(&mut self, layer: LayerId) {
        if let Ok(layer) = self.layer(layer) {
            self.map_call("removeLayer", &[layer.clone()]);
        }
    }

    fn remove_layer(&mut self, id: LayerId) {
        let Some(layer) = self.layers.remove(&id) else {
            return;
        };
        match self.parents.remove(&id).and_then(|p| self.layers.get(&p)) {
            Some(parent) => {
                if let Err(err) = call(parent, "removeLayer", &[layer]) {
                    log::warn!("map: {err}");
                }
            }
            None => self.map_call("removeLayer", &[layer]),
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map_call("setView", &[lat_lng(center), JsValue::from(zoom)]);
    }

    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8) {
        let corners: Array = [lat_lng(bounds.south_west), lat_lng(bounds.north_east)].iter().collect();
        let options = object(&[
            ("maxZoom", JsValue::from(max_zoom)),
            ("padding", pair(FIT_PADDING_PX, FIT_PADDING_PX)),
        ]);
        self.map_call("fitBounds", &[corners.into(), options]);
    }

    fn destroy(&mut self) {
        self.map_call("remove", &[]);
        self.map = None;
        self.layers.clear();
        self.parents.clear();
        self.tile_handlers.clear();
    }
}
