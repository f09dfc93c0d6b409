//! AOI and ROI overlays from GeoJSON.
//!
//! Each overlay lives in a named group that can be hidden and shown without
//! re-reading the data.

#[cfg(test)]
#[path = "geojson_test.rs"]
mod geojson_test;

use std::collections::HashMap;

use catalog::Roi;
use serde_json::{Map, Value, json};

use super::{LayerId, MapBackend, MapError, PathStyle};
use crate::util::escape;

const AOI_COLOR: &str = "#2563eb";
const ROI_COLOR: &str = "#f97316";

/// What an overlay depicts; decides its style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoKind {
    /// Station area of interest.
    Aoi,
    /// Region of interest in an instrument's field of view.
    Roi,
}

impl GeoKind {
    #[must_use]
    pub fn style(self, properties: Option<&Map<String, Value>>) -> PathStyle {
        match self {
            Self::Aoi => PathStyle {
                color: AOI_COLOR.to_owned(),
                weight: 2.0,
                opacity: 0.9,
                fill_color: AOI_COLOR.to_owned(),
                fill_opacity: 0.08,
                dash_array: Some("6 4".to_owned()),
            },
            Self::Roi => {
                let color = properties
                    .and_then(|p| p.get("color"))
                    .and_then(property_color)
                    .unwrap_or_else(|| ROI_COLOR.to_owned());
                let weight = properties
                    .and_then(|p| p.get("thickness"))
                    .and_then(Value::as_f64)
                    .filter(|w| *w > 0.0)
                    .unwrap_or(2.0);
                PathStyle {
                    fill_color: color.clone(),
                    color,
                    weight,
                    opacity: 1.0,
                    fill_opacity: 0.25,
                    dash_array: None,
                }
            }
        }
    }
}

/// Color from a `color` property: `"#rrggbb"`, `"#rgb"` or `[r, g, b]`.
#[must_use]
pub fn property_color(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let checked = escape::css_color(s, "");
            (!checked.is_empty()).then(|| checked.to_owned())
        }
        Value::Array(parts) if parts.len() == 3 => {
            let rgb: Vec<u8> = parts
                .iter()
                .filter_map(|p| p.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect();
            (rgb.len() == 3).then(|| format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

/// Flatten a collection, a single feature, a bare geometry or an array of
/// features into a list of features. Anything else yields nothing.
#[must_use]
pub fn features(data: &Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items.iter().flat_map(features).collect(),
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => obj
                .get("features")
                .map(features)
                .unwrap_or_default(),
            Some("Feature") if obj.get("geometry").is_some_and(|g| !g.is_null()) => vec![data.clone()],
            Some(
                "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon"
                | "GeometryCollection",
            ) => vec![json!({ "type": "Feature", "properties": {}, "geometry": data })],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_owned()),
        _ => None,
    }
}

/// Popup table of a feature's scalar properties, escaped, `name` as title.
#[must_use]
pub fn feature_popup(feature: &Value) -> Option<String> {
    let props = feature.get("properties")?.as_object()?;
    let mut rows = String::new();
    let mut keys: Vec<&String> = props.keys().filter(|k| !matches!(k.as_str(), "name" | "color")).collect();
    keys.sort();
    for key in keys {
        if let Some(text) = props.get(key).and_then(scalar_text) {
            rows.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                escape::html(&catalog::taxonomy::humanize(key)),
                escape::html(&text)
            ));
        }
    }
    let title = feature_tooltip(feature);
    if rows.is_empty() && title.is_none() {
        return None;
    }
    let mut html = String::from("<div class=\"map-popup\">");
    if let Some(title) = title {
        html.push_str(&format!("<h3>{}</h3>", escape::html(&title)));
    }
    if !rows.is_empty() {
        html.push_str(&format!("<table>{rows}</table>"));
    }
    html.push_str("</div>");
    Some(html)
}

/// The feature's `name` property.
#[must_use]
pub fn feature_tooltip(feature: &Value) -> Option<String> {
    feature
        .get("properties")?
        .get("name")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn is_geographic(point: [f64; 2]) -> bool {
    let [x, y] = point;
    x.is_finite() && y.is_finite() && x.abs() <= 180.0 && y.abs() <= 90.0
}

/// Polygon features for ROIs whose points are longitude/latitude pairs.
///
/// Most ROIs are drawn in image pixels and are skipped, as are ROIs with
/// fewer than three points.
#[must_use]
pub fn roi_features(rois: &[Roi]) -> Vec<Value> {
    rois.iter()
        .filter(|roi| roi.points.len() >= 3 && roi.points.iter().all(|p| is_geographic(*p)))
        .map(|roi| {
            let mut ring: Vec<Value> = roi.points.iter().map(|[x, y]| json!([x, y])).collect();
            if roi.points.first() != roi.points.last() {
                ring.push(json!(roi.points[0]));
            }
            let mut props = Map::new();
            props.insert("name".into(), json!(roi.roi_name));
            props.insert("roi_id".into(), json!(roi.id));
            if let Some(description) = &roi.description {
                props.insert("description".into(), json!(description));
            }
            if let Some(color) = roi.color {
                props.insert("color".into(), json!(color));
            }
            if let Some(thickness) = roi.thickness {
                props.insert("thickness".into(), json!(thickness));
            }
            props.insert("auto_generated".into(), json!(roi.auto_generated));
            json!({
                "type": "Feature",
                "properties": props,
                "geometry": { "type": "Polygon", "coordinates": [ring] },
            })
        })
        .collect()
}

#[derive(Debug)]
struct OverlayGroup {
    group: LayerId,
    layers: Vec<LayerId>,
    visible: bool,
}

/// Named overlay groups.
#[derive(Debug, Default)]
pub struct GeoJsonLayerManager {
    groups: HashMap<String, OverlayGroup>,
}

impl GeoJsonLayerManager {
    /// Render `data` into the group `name`, replacing what it held. Returns
    /// the number of features drawn.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn add<B: MapBackend>(
        &mut self,
        backend: &mut B,
        name: &str,
        kind: GeoKind,
        data: &Value,
    ) -> Result<usize, MapError> {
        if !self.groups.contains_key(name) {
            let group = backend.create_group(false)?;
            self.groups.insert(
                name.to_owned(),
                OverlayGroup {
                    group,
                    layers: Vec::new(),
                    visible: true,
                },
            );
        }
        let Some(entry) = self.groups.get_mut(name) else {
            return Ok(0);
        };
        for layer in entry.layers.drain(..) {
            backend.remove_layer(layer);
        }
        for feature in features(data) {
            let style = kind.style(feature.get("properties").and_then(Value::as_object));
            let popup = feature_popup(&feature);
            let tooltip = feature_tooltip(&feature);
            let layer = backend.add_geojson(entry.group, &feature, &style, popup.as_deref(), tooltip.as_deref())?;
            entry.layers.push(layer);
        }
        log::debug!("map: overlay {name} has {} feature(s)", entry.layers.len());
        Ok(entry.layers.len())
    }

    /// Show or hide a group. Unknown names report `false`.
    pub fn set_visible<B: MapBackend>(&mut self, backend: &mut B, name: &str, visible: bool) -> bool {
        let Some(entry) = self.groups.get_mut(name) else {
            return false;
        };
        if entry.visible != visible {
            if visible {
                backend.show_layer(entry.group);
            } else {
                backend.hide_layer(entry.group);
            }
            entry.visible = visible;
        }
        true
    }

    #[must_use]
    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.groups.get(name).map(|g| g.visible)
    }

    pub fn remove<B: MapBackend>(&mut self, backend: &mut B, name: &str) {
        if let Some(entry) = self.groups.remove(name) {
            backend.remove_layer(entry.group);
        }
    }

    pub fn forget(&mut self) {
        self.groups.clear();
    }
}
