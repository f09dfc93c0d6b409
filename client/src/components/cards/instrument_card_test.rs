use catalog::BuiltinTaxonomy;
use catalog::taxonomy::{DEFAULT_COLOR, DEFAULT_ICON};

use super::*;

fn phenocam() -> Instrument {
    Instrument {
        id: 12,
        platform_id: 3,
        normalized_name: "SVB_FOR_PL01_PHE01".to_owned(),
        display_name: "Tower phenocam".to_owned(),
        instrument_type: Some("Phenocam".to_owned()),
        status: Some("Active".to_owned()),
        measurement_status: Some("operational".to_owned()),
        height_m: Some(23.5),
        roi_count: Some(1),
        deployment_date: Some("2019-04-02".to_owned()),
        ..Instrument::default()
    }
}

#[test]
fn known_type_uses_taxonomy_visuals() {
    let model = InstrumentCardModel::new(&phenocam(), &BuiltinTaxonomy);
    assert_eq!(model.kind.label, "Phenocam");
    assert_eq!(model.kind.icon, "fa-camera");
    assert_eq!(model.kind.color, "#2563eb");
    assert_eq!(model.status.class, "badge badge--active");
    assert_eq!(model.measurement.map(|m| m.label), Some("Operational".to_owned()));
    assert_eq!(model.roi_label, "1 ROI");
    assert_eq!(model.height.as_deref(), Some("23.5 m"));
}

#[test]
fn unknown_type_falls_back_to_defaults() {
    let instrument = Instrument {
        instrument_type: Some("quantum flux sensor".to_owned()),
        status: None,
        ..phenocam()
    };
    let model = InstrumentCardModel::new(&instrument, &BuiltinTaxonomy);
    assert_eq!(model.kind.icon, DEFAULT_ICON);
    assert_eq!(model.kind.color, DEFAULT_COLOR);
    assert_eq!(model.kind.label, "Quantum flux sensor");
    assert_eq!(model.status.label, "Unknown");
    assert_eq!(model.status.class, "badge badge--unknown");
}

#[test]
fn missing_type_and_name_still_render() {
    let instrument = Instrument {
        display_name: "  ".to_owned(),
        instrument_type: None,
        measurement_status: None,
        roi_count: None,
        ..phenocam()
    };
    let model = InstrumentCardModel::new(&instrument, &BuiltinTaxonomy);
    assert_eq!(model.title, "SVB_FOR_PL01_PHE01");
    assert_eq!(model.kind.icon, DEFAULT_ICON);
    assert!(model.measurement.is_none());
    assert_eq!(model.roi_label, "No ROIs");
}
