use catalog::BuiltinTaxonomy;

use super::*;

fn valid() -> ProductForm {
    ProductForm {
        name: "SVB NDVI 2024".to_owned(),
        product_type: "Vegetation Index".to_owned(),
        processing_level: "l2".to_owned(),
        quality_score: "87.5".to_owned(),
        start_date: "2024-04-01".to_owned(),
        end_date: "2024-10-31".to_owned(),
        data_url: "https://data.example.org/svb.nc".to_owned(),
        file_size_bytes: "2048".to_owned(),
        ..ProductForm::for_station("SVB")
    }
}

#[test]
fn valid_form_builds_canonical_payload() {
    let body = valid().validate(&BuiltinTaxonomy).unwrap();
    assert_eq!(body["name"], "SVB NDVI 2024");
    assert_eq!(body["product_type"], "vegetation_index");
    assert_eq!(body["processing_level"], "L2");
    assert_eq!(body["quality_score"], 87.5);
    assert_eq!(body["file_size_bytes"], 2048);
    assert_eq!(body["station_acronym"], "SVB");
    assert_eq!(body["doi"], Value::Null);
}

#[test]
fn empty_name_is_an_error() {
    let form = ProductForm {
        name: "   ".to_owned(),
        ..valid()
    };
    let errors = form.validate(&BuiltinTaxonomy).unwrap_err();
    assert_eq!(errors.get("name"), Some("Name is required"));
}

#[test]
fn out_of_range_quality_and_bad_url() {
    let form = ProductForm {
        quality_score: "140".to_owned(),
        data_url: "ftp://x".to_owned(),
        ..valid()
    };
    let errors = form.validate(&BuiltinTaxonomy).unwrap_err();
    assert_eq!(errors.get("quality_score"), Some("Quality score must be between 0 and 100"));
    assert!(errors.get("data_url").is_some());
}

#[test]
fn unknown_type_and_reversed_dates() {
    let form = ProductForm {
        product_type: "hologram".to_owned(),
        start_date: "2024-10-31".to_owned(),
        end_date: "2024-04-01".to_owned(),
        ..valid()
    };
    let errors = form.validate(&BuiltinTaxonomy).unwrap_err();
    assert!(errors.get("product_type").is_some());
    assert_eq!(errors.get("end_date"), Some("End date must not be before start date"));
}

#[test]
fn from_entity_round_trips_inputs() {
    let product = Product {
        id: 4,
        name: "P".to_owned(),
        quality_score: Some(90.0),
        product_date: Some("2024-05-02T10:00:00Z".to_owned()),
        file_size_bytes: Some(10),
        instrument_id: Some(3),
        ..Product::default()
    };
    let form = ProductForm::from_entity(&product);
    assert_eq!(form.quality_score, "90");
    assert_eq!(form.product_date, "2024-05-02");
    assert_eq!(form.file_size_bytes, "10");
    let body = form.validate(&BuiltinTaxonomy).unwrap();
    assert_eq!(body["instrument_id"], 3);
    assert!(body.get("station_acronym").is_none());
}

#[test]
fn untouched_legacy_level_is_kept() {
    let product = Product {
        id: 5,
        name: "P".to_owned(),
        product_type: Some("gcc_timeseries".to_owned()),
        processing_level: Some("L1b".to_owned()),
        ..Product::default()
    };
    let form = ProductForm::from_entity(&product);
    let body = form.validate(&BuiltinTaxonomy).unwrap();
    assert_eq!(body["product_type"], "gcc_timeseries");
    assert_eq!(body["processing_level"], "L1b");

    let edited = ProductForm {
        product_type: "hologram".to_owned(),
        ..form
    };
    assert!(edited.validate(&BuiltinTaxonomy).unwrap_err().get("product_type").is_some());
}
