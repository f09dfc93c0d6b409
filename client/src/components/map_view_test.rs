use catalog::BuiltinTaxonomy;
use serde_json::json;

use super::*;
use crate::map::MapOptions;
use crate::map::recording::{Op, RecordingBackend};

fn ready_map() -> MapController<RecordingBackend> {
    let mut map = MapController::new(RecordingBackend::default());
    map.initialize("map", &MapOptions::from_config(&ClientConfig::default()))
        .unwrap();
    map
}

#[test]
fn markers_are_replaced_on_each_sync() {
    let mut map = ready_map();
    let station = Station {
        id: 1,
        acronym: "ANS".into(),
        display_name: "Abisko".into(),
        latitude: Some(68.35),
        longitude: Some(18.82),
        ..Station::default()
    };
    let platforms = vec![Platform {
        id: 2,
        display_name: "Mast".into(),
        latitude: Some(68.36),
        longitude: Some(18.8),
        ..Platform::default()
    }];
    assert_eq!(sync_markers(&mut map, Some(&station), &platforms, &BuiltinTaxonomy).unwrap(), 2);
    assert_eq!(sync_markers(&mut map, Some(&station), &[], &BuiltinTaxonomy).unwrap(), 1);
    assert_eq!(map.marker_count(), 1);
    assert!(matches!(map.backend().ops.last(), Some(Op::SetView(..))));
}

#[test]
fn overlays_skip_pixel_rois_and_clear_missing_aoi() {
    let mut map = ready_map();
    let aoi = json!({ "type": "Polygon", "coordinates": [[[18.8, 68.3], [18.9, 68.3], [18.9, 68.4], [18.8, 68.3]]] });
    let pixel_roi = Roi {
        points: vec![[10.0, 900.0], [500.0, 900.0], [500.0, 1200.0]],
        ..Roi::default()
    };
    assert_eq!(sync_overlays(&mut map, Some(&aoi), &[pixel_roi.clone()]).unwrap(), (1, 0));
    assert_eq!(sync_overlays(&mut map, None, &[pixel_roi]).unwrap(), (0, 0));
}
