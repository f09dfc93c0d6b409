use catalog::BuiltinTaxonomy;

use super::*;

#[test]
fn record_badges_and_dates() {
    let record = MaintenanceRecord {
        id: 2,
        entity_type: "instrument".to_owned(),
        entity_id: 7,
        status: Some("done".to_owned()),
        priority: Some("urgent".to_owned()),
        scheduled_date: Some("2024-03-01".to_owned()),
        completed_date: Some("2024-03-04T09:30:00".to_owned()),
        description: "Replace housing\nOld one cracked".to_owned(),
        technician: Some(" ".to_owned()),
    };
    let model = MaintenanceCardModel::new(&record, &BuiltinTaxonomy);
    assert_eq!(model.summary, "Replace housing");
    assert_eq!(model.status.label, "Completed");
    assert_eq!(model.priority.class, "badge badge--critical");
    assert_eq!(model.scheduled, "2024-03-01");
    assert_eq!(model.completed.as_deref(), Some("2024-03-04"));
    assert!(model.technician.is_none());
}

#[test]
fn empty_record_is_placeholder() {
    let model = MaintenanceCardModel::new(&MaintenanceRecord::default(), &BuiltinTaxonomy);
    assert_eq!(model.summary, "");
    assert_eq!(model.scheduled, "Not set");
    assert_eq!(model.status.label, "Unknown");
}
