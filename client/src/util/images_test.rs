use super::*;

fn manifest() -> ImageManifest {
    ImageManifest::from_json(
        r#"{"images": {
            "SVB_FOR_PL01_PHE01": "SVB_FOR_PL01_PHE01.jpg",
            "ans_wet_pl01_phe01": "/static/ans.jpg"
        }}"#,
    )
    .unwrap()
}

#[test]
fn listed_photo_gets_base_path() {
    assert_eq!(
        manifest().photo_url("/images/instruments/", "SVB_FOR_PL01_PHE01").as_deref(),
        Some("/images/instruments/SVB_FOR_PL01_PHE01.jpg")
    );
}

#[test]
fn absolute_file_is_kept() {
    assert_eq!(
        manifest().photo_url("/images", "ANS_WET_PL01_PHE01").as_deref(),
        Some("/static/ans.jpg")
    );
}

#[test]
fn unlisted_or_blank_name_has_no_photo() {
    assert_eq!(manifest().photo_url("/images", "LON_AGR_PL01_PHE01"), None);
    assert_eq!(manifest().photo_url("/images", "  "), None);
}

#[test]
fn resolve_all_keeps_order() {
    let instruments = vec![
        Instrument {
            id: 2,
            normalized_name: "missing".to_owned(),
            ..Instrument::default()
        },
        Instrument {
            id: 1,
            normalized_name: "SVB_FOR_PL01_PHE01".to_owned(),
            ..Instrument::default()
        },
    ];
    let resolved = manifest().resolve_all("/img", &instruments);
    assert_eq!(resolved[0], (2, None));
    assert_eq!(resolved[1], (1, Some("/img/SVB_FOR_PL01_PHE01.jpg".to_owned())));
}

#[test]
fn empty_object_is_empty_manifest() {
    assert!(ImageManifest::from_json("{}").unwrap().is_empty());
    assert!(ImageManifest::from_json("\"images\"").is_err());
}
