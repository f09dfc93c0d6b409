use catalog::BuiltinTaxonomy;

use super::*;

fn valid() -> CampaignForm {
    CampaignForm {
        name: "Spring drone survey".to_owned(),
        campaign_type: "field".to_owned(),
        planned_start_datetime: "2024-05-01T08:00".to_owned(),
        planned_end_datetime: "2024-05-03T17:00".to_owned(),
        objectives: "Map canopy\n\n  Calibrate cameras  ".to_owned(),
        ..CampaignForm::for_station(Some(7))
    }
}

#[test]
fn valid_form_payload() {
    let body = valid().validate(&BuiltinTaxonomy).unwrap();
    assert_eq!(body["station_id"], 7);
    assert_eq!(body["campaign_type"], "field_campaign");
    assert_eq!(body["status"], "planned");
    assert_eq!(body["objectives"], json!(["Map canopy", "Calibrate cameras"]));
    assert_eq!(body["expected_outcomes"], json!([]));
    assert_eq!(body["budget"], Value::Null);
}

#[test]
fn end_before_start_is_an_error() {
    let form = CampaignForm {
        planned_end_datetime: "2024-04-30T08:00".to_owned(),
        ..valid()
    };
    let errors = form.validate(&BuiltinTaxonomy).unwrap_err();
    assert_eq!(
        errors.get("planned_end_datetime"),
        Some("Planned end must not be before planned start")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn same_start_and_end_is_fine() {
    let form = CampaignForm {
        planned_end_datetime: "2024-05-01T08:00".to_owned(),
        ..valid()
    };
    assert!(form.validate(&BuiltinTaxonomy).is_ok());
}

#[test]
fn invalid_date_and_negative_budget() {
    let form = CampaignForm {
        planned_start_datetime: "next tuesday".to_owned(),
        budget: "-5".to_owned(),
        ..valid()
    };
    let errors = form.validate(&BuiltinTaxonomy).unwrap_err();
    assert_eq!(errors.get("planned_start_datetime"), Some("Planned start is not a valid date"));
    assert!(errors.get("budget").is_some());
}

#[test]
fn from_entity_joins_lists() {
    let campaign = Campaign {
        id: 2,
        name: "C".to_owned(),
        objectives: vec!["a".to_owned(), "b".to_owned()],
        planned_start_datetime: Some("2024-05-01T08:00:00Z".to_owned()),
        budget: Some(1500.0),
        ..Campaign::default()
    };
    let form = CampaignForm::from_entity(&campaign);
    assert_eq!(form.objectives, "a\nb");
    assert_eq!(form.planned_start_datetime, "2024-05-01T08:00");
    assert_eq!(form.budget, "1500");
}

#[test]
fn untouched_legacy_status_is_kept() {
    let campaign = Campaign {
        id: 3,
        name: "Snow survey".to_owned(),
        campaign_type: Some("snow_course".to_owned()),
        status: Some("shelved".to_owned()),
        ..Campaign::default()
    };
    let form = CampaignForm::from_entity(&campaign);
    let body = form.validate(&BuiltinTaxonomy).unwrap();
    assert_eq!(body["campaign_type"], "snow_course");
    assert_eq!(body["status"], "shelved");

    let edited = CampaignForm {
        status: "frozen".to_owned(),
        ..form
    };
    assert!(edited.validate(&BuiltinTaxonomy).unwrap_err().get("status").is_some());
}
