use catalog::BuiltinTaxonomy;

use super::*;

#[test]
fn quality_buckets() {
    assert_eq!(QualityClass::from_score(Some(80.0)), QualityClass::High);
    assert_eq!(QualityClass::from_score(Some(79.9)), QualityClass::Medium);
    assert_eq!(QualityClass::from_score(Some(50.0)), QualityClass::Medium);
    assert_eq!(QualityClass::from_score(Some(12.0)), QualityClass::Low);
    assert_eq!(QualityClass::from_score(None), QualityClass::None);
    assert_eq!(QualityClass::from_score(Some(f64::NAN)), QualityClass::None);
    assert_eq!(QualityClass::Medium.css_class(), "quality quality--medium");
}

#[test]
fn product_model() {
    let product = Product {
        id: 5,
        name: "Daily GCC".to_owned(),
        product_type: Some("timeseries".to_owned()),
        processing_level: Some("L2".to_owned()),
        quality_score: Some(91.6),
        start_date: Some("2023-04-01".to_owned()),
        end_date: None,
        file_size_bytes: Some(2048),
        ..Product::default()
    };
    let model = ProductCardModel::new(&product, &BuiltinTaxonomy);
    assert_eq!(model.kind.label, "Time Series");
    assert_eq!(model.level.map(|l| l.class), Some("badge badge--l2".to_owned()));
    assert_eq!(model.quality, QualityClass::High);
    assert_eq!(model.quality_label.as_deref(), Some("92%"));
    assert_eq!(model.period, "2023-04-01 → TBD");
    assert_eq!(model.size.as_deref(), Some("2.0 KB"));
}

#[test]
fn single_date_product() {
    let product = Product {
        product_date: Some("2022-07-15T10:00:00Z".to_owned()),
        ..Product::default()
    };
    let model = ProductCardModel::new(&product, &BuiltinTaxonomy);
    assert_eq!(model.period, "2022-07-15");
    assert_eq!(model.quality, QualityClass::None);
    assert!(model.level.is_none());
}
