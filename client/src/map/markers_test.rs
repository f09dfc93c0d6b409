use catalog::BuiltinTaxonomy;

use super::*;
use crate::map::recording::RecordingBackend;

fn platform(id: i64, lat: Option<f64>) -> Platform {
    Platform {
        id,
        display_name: "Tower <1>".into(),
        normalized_name: "SVB_FOR_PL01".into(),
        ecosystem_code: Some("FOR".into()),
        latitude: lat,
        longitude: Some(19.77),
        ..Platform::default()
    }
}

#[test]
fn icon_uses_taxonomy_color_and_rejects_bad_css() {
    let html = icon_html(MarkerKind::Platform, "#166534", "fa-tree");
    assert!(html.contains("fill=\"#166534\""));
    assert!(html.contains("map-pin--platform"));
    assert!(html.contains("fas fa-tree"));

    let hostile = icon_html(MarkerKind::Instrument, "red;background:url(x)", "fa-x\"><script>");
    assert!(hostile.contains(&format!("fill=\"{DEFAULT_COLOR}\"")));
    assert!(!hostile.contains("<script>"));
}

#[test]
fn popup_text_is_escaped() {
    let marker = platform_marker(&platform(1, Some(64.25)), &BuiltinTaxonomy).unwrap();
    let popup = marker.popup_html.unwrap();
    assert!(popup.contains("Tower &lt;1&gt;"));
    assert!(popup.contains("<dd>Forest</dd>"));
    assert_eq!(marker.tooltip.as_deref(), Some("Tower <1>"));
}

#[test]
fn entities_without_coordinates_get_no_marker() {
    assert!(platform_marker(&platform(1, None), &BuiltinTaxonomy).is_none());
    assert!(platform_marker(&platform(1, Some(123.0)), &BuiltinTaxonomy).is_none());
    let station = Station {
        acronym: "SVB".into(),
        display_name: "Svartberget".into(),
        ..Station::default()
    };
    assert!(station_marker(&station).is_none());
}

#[test]
fn instrument_marker_falls_back_to_normalized_name() {
    let instrument = Instrument {
        normalized_name: "SVB_FOR_PL01_PHE01".into(),
        instrument_type: Some("phenocam".into()),
        latitude: Some(64.2),
        longitude: Some(19.7),
        ..Instrument::default()
    };
    let marker = instrument_marker(&instrument, &BuiltinTaxonomy).unwrap();
    assert_eq!(marker.tooltip.as_deref(), Some("SVB_FOR_PL01_PHE01"));
    assert!(marker.icon_html.contains("#2563eb"));
    assert!(marker.popup_html.unwrap().contains("<dd>Unknown</dd>"));
}

#[test]
fn clusters_only_with_plugin() {
    let mut backend = RecordingBackend::without_cluster_plugin();
    let mut markers = MarkerManager::default();
    markers.install(&mut backend, true).unwrap();
    assert!(!markers.clustered());

    let mut backend = RecordingBackend::default();
    let mut markers = MarkerManager::default();
    markers.install(&mut backend, true).unwrap();
    assert!(markers.clustered());

    let mut markers = MarkerManager::default();
    markers.install(&mut backend, false).unwrap();
    assert!(!markers.clustered());
}

#[test]
fn put_replaces_by_key_and_clear_removes_all() {
    let mut backend = RecordingBackend::default();
    let mut markers = MarkerManager::default();
    markers.install(&mut backend, false).unwrap();
    let spec = platform_marker(&platform(4, Some(64.0)), &BuiltinTaxonomy).unwrap();

    markers.put(&mut backend, MarkerKind::Platform.key(4), &spec).unwrap();
    markers.put(&mut backend, MarkerKind::Platform.key(4), &spec).unwrap();
    assert_eq!(markers.len(), 1);
    assert!(markers.contains("platform:4"));
    assert_eq!(backend.markers(), 2);

    markers.clear(&mut backend);
    assert!(markers.is_empty());
}

#[test]
fn put_before_install_is_an_error() {
    let mut backend = RecordingBackend::default();
    let mut markers = MarkerManager::default();
    let spec = platform_marker(&platform(4, Some(64.0)), &BuiltinTaxonomy).unwrap();
    assert!(matches!(
        markers.put(&mut backend, "platform:4".into(), &spec),
        Err(MapError::Backend(_))
    ));
}
