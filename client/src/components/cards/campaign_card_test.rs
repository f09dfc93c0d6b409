use catalog::BuiltinTaxonomy;

use super::*;

#[test]
fn planned_range_and_badges() {
    let campaign = Campaign {
        id: 3,
        name: "Spring drone survey".to_owned(),
        campaign_type: Some("field".to_owned()),
        status: Some("in_progress".to_owned()),
        planned_start_datetime: Some("2024-05-01T08:00".to_owned()),
        objectives: vec!["Map canopy".to_owned(), "Check ROIs".to_owned()],
        coordinator: Some("L. Eklund".to_owned()),
        ..Campaign::default()
    };
    let model = CampaignCardModel::new(&campaign, &BuiltinTaxonomy);
    assert_eq!(model.kind.label, "Field Campaign");
    assert_eq!(model.status.label, "Active");
    assert_eq!(model.status.class, "badge badge--active");
    assert_eq!(model.dates, "2024-05-01 → TBD");
    assert_eq!(model.objective_count, 2);
}

#[test]
fn no_dates_reads_not_set() {
    let model = CampaignCardModel::new(&Campaign::default(), &BuiltinTaxonomy);
    assert_eq!(model.dates, "Not set");
    assert!(model.coordinator.is_none());
}
