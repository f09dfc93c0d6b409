//! Station, platform and instrument markers.
//!
//! Icons are small SVG pins inside a div; popups are HTML strings. All text
//! from the catalog is escaped before it lands in either.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

use std::collections::HashMap;

use catalog::taxonomy::{DEFAULT_COLOR, Vocabulary};
use catalog::{Instrument, Platform, Station, TaxonomyProvider};

use super::{LatLng, LayerId, MapBackend, MapError, MarkerSpec};
use crate::util::{escape, format};

const STATION_COLOR: &str = "#b91c1c";
const PIN_SIZE: (u32, u32) = (28, 36);
const STATION_PIN_SIZE: (u32, u32) = (34, 44);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Station,
    Platform,
    Instrument,
}

impl MarkerKind {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Platform => "platform",
            Self::Instrument => "instrument",
        }
    }

    /// Registry key for one entity, e.g. `platform:4`.
    #[must_use]
    pub fn key(self, id: i64) -> String {
        format!("{}:{id}", self.prefix())
    }
}

/// Div-icon HTML: a colored pin with a Font Awesome glyph on top.
#[must_use]
pub fn icon_html(kind: MarkerKind, color: &str, icon: &str) -> String {
    let color = escape::css_color(color, DEFAULT_COLOR);
    let (w, h) = if kind == MarkerKind::Station { STATION_PIN_SIZE } else { PIN_SIZE };
    format!(
        "<div class=\"map-pin map-pin--{prefix}\">\
<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 28 36\" aria-hidden=\"true\">\
<path d=\"M14 0C6.3 0 0 6.3 0 14c0 10.5 14 22 14 22s14-11.5 14-22C28 6.3 21.7 0 14 0z\" fill=\"{color}\" stroke=\"#ffffff\" stroke-width=\"1.5\"/>\
</svg><i class=\"fas {icon}\"></i></div>",
        prefix = kind.prefix(),
        icon = escape::html(icon),
    )
}

fn popup(title: &str, rows: &[(&str, Option<String>)]) -> String {
    let mut html = format!("<div class=\"map-popup\"><h3>{}</h3><dl>", escape::html(title));
    for (label, value) in rows {
        if let Some(value) = value {
            html.push_str(&format!("<dt>{}</dt><dd>{}</dd>", escape::html(label), escape::html(value)));
        }
    }
    html.push_str("</dl></div>");
    html
}

/// Marker for the station itself; `None` without usable coordinates.
#[must_use]
pub fn station_marker(station: &Station) -> Option<MarkerSpec> {
    let position = LatLng::from_optional(station.latitude, station.longitude)?;
    Some(MarkerSpec {
        position,
        icon_html: icon_html(MarkerKind::Station, STATION_COLOR, "fa-tower-observation"),
        icon_size: STATION_PIN_SIZE,
        popup_html: Some(popup(
            &station.display_name,
            &[
                ("Acronym", Some(station.acronym.clone())),
                ("Coordinates", format::coordinates(station.latitude, station.longitude)),
                ("Description", station.description.clone()),
            ],
        )),
        tooltip: Some(station.display_name.clone()),
    })
}

#[must_use]
pub fn platform_marker(platform: &Platform, taxonomy: &dyn TaxonomyProvider) -> Option<MarkerSpec> {
    let position = LatLng::from_optional(platform.latitude, platform.longitude)?;
    let ecosystem = taxonomy.resolve(Vocabulary::Ecosystem, platform.ecosystem_code.as_deref());
    Some(MarkerSpec {
        position,
        icon_html: icon_html(MarkerKind::Platform, &ecosystem.color, &ecosystem.icon),
        icon_size: PIN_SIZE,
        popup_html: Some(popup(
            &platform.display_name,
            &[
                ("Name", Some(platform.normalized_name.clone())),
                ("Ecosystem", Some(ecosystem.label)),
                ("Height", format::meters(platform.height_m)),
                ("Mounting", platform.mounting_structure.clone()),
                ("Instruments", platform.instrument_count.map(|n| n.to_string())),
            ],
        )),
        tooltip: Some(platform.display_name.clone()),
    })
}

#[must_use]
pub fn instrument_marker(instrument: &Instrument, taxonomy: &dyn TaxonomyProvider) -> Option<MarkerSpec> {
    let position = LatLng::from_optional(instrument.latitude, instrument.longitude)?;
    let kind = taxonomy.resolve(Vocabulary::InstrumentType, instrument.instrument_type.as_deref());
    let status = taxonomy.resolve(Vocabulary::InstrumentStatus, instrument.status.as_deref());
    let title = if instrument.display_name.trim().is_empty() {
        &instrument.normalized_name
    } else {
        &instrument.display_name
    };
    Some(MarkerSpec {
        position,
        icon_html: icon_html(MarkerKind::Instrument, &kind.color, &kind.icon),
        icon_size: PIN_SIZE,
        popup_html: Some(popup(
            title,
            &[
                ("Name", Some(instrument.normalized_name.clone())),
                ("Type", Some(kind.label)),
                ("Status", Some(status.label)),
                ("Viewing direction", instrument.viewing_direction.clone()),
                ("Height", format::meters(instrument.height_m)),
            ],
        )),
        tooltip: Some(title.clone()),
    })
}

/// Markers on the map, by registry key.
#[derive(Debug, Default)]
pub struct MarkerManager {
    group: Option<LayerId>,
    clustered: bool,
    markers: HashMap<String, (LayerId, LatLng)>,
}

impl MarkerManager {
    /// Create the marker group. Clusters only when asked to and the plugin
    /// is loaded.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure.
    pub fn install<B: MapBackend>(&mut self, backend: &mut B, cluster: bool) -> Result<(), MapError> {
        self.clustered = cluster && backend.cluster_plugin_available();
        if cluster && !self.clustered {
            log::info!("map: marker cluster plugin not loaded, using a plain layer group");
        }
        self.group = Some(backend.create_group(self.clustered)?);
        Ok(())
    }

    #[must_use]
    pub fn clustered(&self) -> bool {
        self.clustered
    }

    /// Add or replace the marker under `key`.
    ///
    /// # Errors
    ///
    /// [`MapError::Backend`] before [`Self::install`], or on backend failure.
    pub fn put<B: MapBackend>(&mut self, backend: &mut B, key: String, marker: &MarkerSpec) -> Result<(), MapError> {
        let group = self
            .group
            .ok_or_else(|| MapError::Backend("map is not initialized".to_owned()))?;
        if let Some((old, _)) = self.markers.remove(&key) {
            backend.remove_layer(old);
        }
        let id = backend.add_marker(group, marker)?;
        self.markers.insert(key, (id, marker.position));
        Ok(())
    }

    pub fn clear<B: MapBackend>(&mut self, backend: &mut B) {
        for (_, (id, _)) in self.markers.drain() {
            backend.remove_layer(id);
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.markers.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = LatLng> + '_ {
        self.markers.values().map(|(_, pos)| *pos)
    }

    /// Drop tracking without touching the backend (the map is gone).
    pub fn forget(&mut self) {
        self.markers.clear();
        self.group = None;
    }
}
