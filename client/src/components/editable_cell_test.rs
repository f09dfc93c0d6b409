use super::*;

#[test]
fn display_uses_taxonomy_labels() {
    let row = Instrument {
        display_name: "Mast camera".to_owned(),
        status: Some("under_maintenance".to_owned()),
        measurement_status: None,
        ..Instrument::default()
    };
    let taxonomy = Taxonomy::builtin();
    assert_eq!(display_value(&row, EditableField::DisplayName, &taxonomy), "Mast camera");
    assert_eq!(display_value(&row, EditableField::Status, &taxonomy), "Maintenance");
    assert_eq!(display_value(&row, EditableField::MeasurementStatus, &taxonomy), "—");
}
