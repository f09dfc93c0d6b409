use super::*;
use crate::map::recording::{Op, RecordingBackend};

#[test]
fn error_logging_is_throttled() {
    let mut counter = TileErrorCounter::default();
    let logged: Vec<u32> = (1..=250)
        .filter_map(|n| counter.record("osm", &format!("tile-{n}")).map(|_| n))
        .collect();
    assert_eq!(logged, vec![1, 2, 3, 100, 200]);
    assert_eq!(counter.count(), 250);
    assert_eq!(
        counter.record("osm", "x"),
        None,
        "251st failure is not a summary point"
    );
}

#[test]
fn summary_line_mentions_total() {
    let mut counter = TileErrorCounter::default();
    let mut last = None;
    for _ in 0..100 {
        last = counter.record("topo", "t");
    }
    assert_eq!(last.as_deref(), Some("100 tile load failures on topo so far"));
}

#[test]
fn definitions_cover_three_layers() {
    assert_eq!(definition("satellite").map(|d| d.max_zoom), Some(19));
    assert_eq!(definition("topo").map(|d| d.max_zoom), Some(17));
    assert!(definition("osm").is_some_and(|d| d.url.contains("openstreetmap")));
    assert!(definition("bing").is_none());
    assert!(ERROR_TILE.starts_with("data:image/svg+xml"));
}

#[test]
fn one_base_layer_at_a_time() {
    let mut backend = RecordingBackend::default();
    let mut tiles = TileLayerManager::default();
    tiles.install(&mut backend, "nope").unwrap();
    assert_eq!(tiles.active(), Some("osm"));

    assert!(tiles.switch(&mut backend, "satellite"));
    assert!(!tiles.switch(&mut backend, "bing"));
    assert_eq!(tiles.active(), Some("satellite"));

    let visible: Vec<_> = backend.visible_tile_keys();
    assert_eq!(visible, vec!["satellite"]);
    assert!(backend.ops.iter().any(|op| matches!(op, Op::Hide(_))));
}
