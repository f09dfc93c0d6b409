//! Station map with base-layer switcher and overlay toggles.

#[cfg(test)]
#[path = "map_view_test.rs"]
mod map_view_test;

use catalog::{Platform, Roi, Station, TaxonomyProvider};
use leptos::prelude::*;
use serde_json::Value;

use crate::app::Taxonomy;
use crate::config::ClientConfig;
use crate::map::geojson::{GeoKind, roi_features};
use crate::map::tiles::{DEFAULT_LAYER, TILE_LAYERS};
use crate::map::{MapBackend, MapController, MapError};

pub const AOI_LAYER: &str = "aoi";
pub const ROI_LAYER: &str = "roi";

/// Redraw the station and platform markers, then frame them.
///
/// # Errors
///
/// Propagates backend failures.
pub fn sync_markers<B: MapBackend>(
    map: &mut MapController<B>,
    station: Option<&Station>,
    platforms: &[Platform],
    taxonomy: &dyn TaxonomyProvider,
) -> Result<usize, MapError> {
    map.clear_all_markers();
    let mut placed = 0;
    if let Some(station) = station {
        placed += usize::from(map.add_station_marker(station)?);
    }
    placed += map.add_platform_markers(platforms, taxonomy)?;
    map.fit_to_markers();
    Ok(placed)
}

/// Replace the AOI and ROI overlays. A missing AOI empties its layer.
///
/// # Errors
///
/// Propagates backend failures.
pub fn sync_overlays<B: MapBackend>(
    map: &mut MapController<B>,
    aoi: Option<&Value>,
    rois: &[Roi],
) -> Result<(usize, usize), MapError> {
    let aoi_count = map.add_geojson_layer(AOI_LAYER, GeoKind::Aoi, aoi.unwrap_or(&Value::Null))?;
    let roi_count = map.add_geojson_layer(ROI_LAYER, GeoKind::Roi, &Value::Array(roi_features(rois)))?;
    Ok((aoi_count, roi_count))
}

#[component]
pub fn MapView(
    container_id: &'static str,
    #[prop(into)] station: Signal<Option<Station>>,
    #[prop(into)] platforms: Signal<Vec<Platform>>,
    #[prop(into)] aoi: Signal<Option<Value>>,
    #[prop(into)] rois: Signal<Vec<Roi>>,
) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let error = RwSignal::new(None::<MapError>);
    let ready = RwSignal::new(false);
    let base = RwSignal::new(DEFAULT_LAYER);
    let show_aoi = RwSignal::new(true);
    let show_roi = RwSignal::new(true);
    let node = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        use crate::map::MapOptions;
        use crate::map::leaflet::LeafletBackend;

        let map = StoredValue::new_local(MapController::new(LeafletBackend::default()));
        let options = MapOptions::from_config(&config);

        Effect::new(move || {
            if node.get().is_none() || ready.get_untracked() {
                return;
            }
            match map.try_update_value(|m| m.initialize(container_id, &options)) {
                Some(Ok(())) => ready.set(true),
                Some(Err(err)) => {
                    log::error!("map: {err}");
                    error.set(Some(err));
                }
                None => {}
            }
        });

        Effect::new(move || {
            if !ready.get() {
                return;
            }
            let station = station.get();
            let platforms = platforms.get();
            let taxonomy = taxonomy.get();
            if let Some(Err(err)) =
                map.try_update_value(|m| sync_markers(m, station.as_ref(), &platforms, taxonomy.provider()))
            {
                log::warn!("map: markers not drawn: {err}");
            }
        });

        Effect::new(move || {
            if !ready.get() {
                return;
            }
            let aoi = aoi.get();
            let rois = rois.get();
            if let Some(Err(err)) = map.try_update_value(|m| sync_overlays(m, aoi.as_ref(), &rois)) {
                log::warn!("map: overlays not drawn: {err}");
            }
            let (aoi_on, roi_on) = (show_aoi.get_untracked(), show_roi.get_untracked());
            map.update_value(|m| {
                m.set_layer_group_visible(AOI_LAYER, aoi_on);
                m.set_layer_group_visible(ROI_LAYER, roi_on);
            });
        });

        Effect::new(move || {
            let key = base.get();
            let (aoi_on, roi_on) = (show_aoi.get(), show_roi.get());
            if ready.get() {
                map.update_value(|m| {
                    m.switch_base_layer(key);
                    m.set_layer_group_visible(AOI_LAYER, aoi_on);
                    m.set_layer_group_visible(ROI_LAYER, roi_on);
                });
            }
        });

        on_cleanup(move || {
            let _ = map.try_update_value(MapController::destroy);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, taxonomy, station, platforms, aoi, rois);
    }

    let layer_buttons = TILE_LAYERS
        .iter()
        .map(|def| {
            let key = def.key;
            view! {
                <button
                    type="button"
                    class="chip"
                    class:chip--active=move || base.get() == key
                    aria-pressed=move || (base.get() == key).to_string()
                    on:click=move |_| base.set(key)
                >
                    {def.name}
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="map-panel">
            <div class="map-toolbar">
                <div class="map-toolbar__layers" role="group" aria-label="Base map">
                    {layer_buttons}
                </div>
                <label class="map-toolbar__toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || show_aoi.get()
                        on:change=move |ev| show_aoi.set(event_target_checked(&ev))
                    />
                    " Station area"
                </label>
                <label class="map-toolbar__toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || show_roi.get()
                        on:change=move |ev| show_roi.set(event_target_checked(&ev))
                    />
                    " ROIs"
                </label>
            </div>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! {
                            <div class="map-error" role="alert">
                                <i class="fas fa-map-location-dot"></i>
                                <p>"The map could not be loaded."</p>
                                <p class="map-error__detail">{err.to_string()}</p>
                            </div>
                        }
                    })
            }}
            <div
                id=container_id
                class="map-canvas"
                class:map-canvas--hidden=move || error.get().is_some()
                node_ref=node
            ></div>
        </section>
    }
}
