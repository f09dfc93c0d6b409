use serde_json::json;

use super::*;

fn sample() -> (Value, Vec<Value>, Vec<Value>, HashMap<i64, Vec<Value>>) {
    let station = json!({ "id": 1, "acronym": "SVB", "display_name": "Svartberget" });
    let platforms = vec![
        json!({ "id": 20, "display_name": "Tower" }),
        json!({ "id": "10", "display_name": "Mast" }),
    ];
    let instruments = vec![
        json!({ "id": 101, "platform_id": 10, "display_name": "SVB_PHE02" }),
        json!({ "id": 100, "platform_id": "10", "display_name": "SVB_PHE01" }),
        json!({ "id": 200, "platform_id": 20, "display_name": "SVB_MS01" }),
        json!({ "id": 300, "platform_id": 99, "display_name": "orphan" }),
    ];
    let mut rois = HashMap::new();
    rois.insert(100, vec![json!({ "roi_name": "ROI_02" }), json!({ "roi_name": "ROI_01" })]);
    rois.insert(200, vec![json!({ "roi_name": "ROI_00" })]);
    (station, platforms, instruments, rois)
}

#[test]
fn nests_and_orders_the_station_tree() {
    let (station, platforms, instruments, rois) = sample();
    let (doc, counts) = nest_station(station, platforms, instruments, rois).unwrap();

    assert_eq!(
        counts,
        ExportCounts {
            platforms: 2,
            instruments: 3,
            rois: 3
        }
    );
    let platforms = doc["platforms"].as_array().unwrap();
    assert_eq!(platforms[0]["display_name"], "Mast");
    assert_eq!(platforms[0]["instruments"][0]["display_name"], "SVB_PHE01");
    assert_eq!(platforms[0]["instruments"][0]["rois"][0]["roi_name"], "ROI_01");
    assert_eq!(platforms[0]["instruments"][1]["rois"], json!([]));
    assert_eq!(platforms[1]["instruments"][0]["rois"][0]["roi_name"], "ROI_00");
}

#[test]
fn stamp_writes_export_meta() {
    let (station, platforms, instruments, rois) = sample();
    let (mut doc, counts) = nest_station(station, platforms, instruments, rois).unwrap();
    stamp(&mut doc, counts, "2026-10-19T12:00:00Z");

    let meta = &doc[META_KEY];
    assert_eq!(meta["exported_at"], "2026-10-19T12:00:00Z");
    assert_eq!(meta["platform_count"], 2);
    assert_eq!(meta["instrument_count"], 3);
    assert_eq!(meta["roi_count"], 3);
    assert_eq!(doc["acronym"], "SVB");
}

#[test]
fn non_object_station_is_rejected() {
    let err = nest_station(json!([1, 2]), Vec::new(), Vec::new(), HashMap::new()).unwrap_err();
    assert!(matches!(err, CliError::InvalidPayload("station")));
}

#[test]
fn default_file_name_is_lowercase() {
    assert_eq!(
        default_file_name(Path::new("exports"), " SVB "),
        PathBuf::from("exports/svb_export.json")
    );
}

#[test]
fn acronyms_are_sorted_and_unique() {
    let stations = vec![
        json!({ "acronym": "svb" }),
        json!({ "acronym": "ANS" }),
        json!({ "acronym": "SVB" }),
        json!({ "display_name": "no acronym" }),
    ];
    assert_eq!(station_acronyms(&stations), vec!["ANS", "SVB"]);
}

#[test]
fn label_falls_back_to_acronym() {
    assert_eq!(station_label(&json!({ "display_name": "Abisko" }), "ANS"), "Abisko (ANS)");
    assert_eq!(station_label(&json!({ "display_name": "  " }), "ANS"), "ANS");
}
