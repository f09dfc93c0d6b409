use catalog::BuiltinTaxonomy;
use serde_json::json;

use super::*;
use crate::config::ClientConfig;
use crate::map::recording::{Op, RecordingBackend};

fn ready() -> MapController<RecordingBackend> {
    let mut map = MapController::new(RecordingBackend::default());
    map.initialize("map", &MapOptions::from_config(&ClientConfig::default()))
        .unwrap();
    map
}

fn platform(id: i64, lat: f64, lng: f64) -> Platform {
    Platform {
        id,
        display_name: format!("P{id}"),
        latitude: Some(lat),
        longitude: Some(lng),
        ..Platform::default()
    }
}

#[test]
fn initialize_reports_missing_library_and_container() {
    let mut map = MapController::new(RecordingBackend::without_library());
    let options = MapOptions::from_config(&ClientConfig::default());
    assert_eq!(map.initialize("map", &options), Err(MapError::LibraryMissing));
    assert!(!map.is_ready());

    let mut map = MapController::new(RecordingBackend::with_missing_container());
    assert_eq!(
        map.initialize("nowhere", &options),
        Err(MapError::ContainerMissing("nowhere".into()))
    );
}

#[test]
fn initialize_installs_tiles_and_clustered_group() {
    let map = ready();
    assert!(map.is_ready());
    assert_eq!(map.base_layer(), Some("osm"));
    let ops = &map.backend().ops;
    assert_eq!(ops[0], Op::CreateMap("map".into()));
    assert_eq!(ops.iter().filter(|op| matches!(op, Op::Tile(_))).count(), 3);
    assert!(ops.contains(&Op::Group { clustered: true }));
}

#[test]
fn markers_skip_missing_coordinates() {
    let mut map = ready();
    let station = Station {
        id: 1,
        acronym: "SVB".into(),
        display_name: "Svartberget".into(),
        latitude: Some(64.25),
        longitude: Some(19.77),
        ..Station::default()
    };
    assert!(map.add_station_marker(&station).unwrap());

    let mut nowhere = platform(3, 0.0, 0.0);
    nowhere.latitude = None;
    let placed = map
        .add_platform_markers(&[platform(1, 64.2, 19.7), platform(2, 64.3, 19.8), nowhere], &BuiltinTaxonomy)
        .unwrap();
    assert_eq!(placed, 2);
    assert_eq!(map.marker_count(), 3);

    map.clear_all_markers();
    assert_eq!(map.marker_count(), 0);
    assert!(!map.fit_to_markers());
}

#[test]
fn fit_to_markers_zooms_in_on_a_single_spot() {
    let mut map = ready();
    map.add_platform_markers(&[platform(1, 64.2, 19.7)], &BuiltinTaxonomy)
        .unwrap();
    assert!(map.fit_to_markers());
    assert_eq!(
        map.backend().ops.last(),
        Some(&Op::SetView(LatLng::new(64.2, 19.7), SINGLE_MARKER_ZOOM))
    );

    map.add_platform_markers(&[platform(2, 64.4, 19.9)], &BuiltinTaxonomy)
        .unwrap();
    assert!(map.fit_to_markers());
    let Some(Op::FitBounds(bounds, FIT_MAX_ZOOM)) = map.backend().ops.last().cloned() else {
        panic!("expected fit_bounds");
    };
    assert_eq!(bounds.south_west, LatLng::new(64.2, 19.7));
    assert_eq!(bounds.north_east, LatLng::new(64.4, 19.9));
}

#[test]
fn overlays_need_an_initialized_map() {
    let mut map = MapController::new(RecordingBackend::default());
    let aoi = json!({ "type": "Point", "coordinates": [19.7, 64.2] });
    assert!(map.add_geojson_layer("aoi", GeoKind::Aoi, &aoi).is_err());

    let mut map = ready();
    assert_eq!(map.add_geojson_layer("aoi", GeoKind::Aoi, &aoi).unwrap(), 1);
    assert!(map.set_layer_group_visible("aoi", false));
    assert!(!map.set_layer_group_visible("roi", false));
}

#[test]
fn destroy_allows_reinitialize() {
    let mut map = ready();
    assert!(map.switch_base_layer("topo"));
    map.destroy();
    assert!(!map.is_ready());
    assert!(!map.switch_base_layer("osm"));
    map.set_view(LatLng::new(0.0, 0.0), 3);
    assert!(!map.backend().ops.iter().any(|op| matches!(op, Op::SetView(..))));

    map.initialize("map", &MapOptions::from_config(&ClientConfig::default()))
        .unwrap();
    assert_eq!(map.base_layer(), Some("osm"));
}

#[test]
fn failed_setup_tears_down_the_half_built_map() {
    let mut map = MapController::new(RecordingBackend::with_failing_groups());
    let options = MapOptions::from_config(&ClientConfig::default());
    assert!(matches!(map.initialize("map", &options), Err(MapError::Backend(_))));
    assert!(!map.is_ready());
    assert_eq!(map.base_layer(), None);
    assert_eq!(map.backend().ops.last(), Some(&Op::Destroy));

    let created = map.backend().ops.iter().filter(|op| matches!(op, Op::CreateMap(_))).count();
    let destroyed = map.backend().ops.iter().filter(|op| matches!(op, Op::Destroy)).count();
    assert_eq!((created, destroyed), (1, 1));
}
