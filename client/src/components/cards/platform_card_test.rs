use catalog::BuiltinTaxonomy;
use catalog::taxonomy::DEFAULT_COLOR;

use super::*;

#[test]
fn ecosystem_and_counts() {
    let platform = Platform {
        id: 4,
        display_name: "Forest tower".to_owned(),
        normalized_name: "SVB_FOR_PL01".to_owned(),
        ecosystem_code: Some("for".to_owned()),
        latitude: Some(64.256_111),
        longitude: Some(19.771_23),
        ..Platform::default()
    };
    let model = PlatformCardModel::new(&platform, 1, &BuiltinTaxonomy);
    assert_eq!(model.ecosystem.label, "Forest");
    assert_eq!(model.instrument_label, "1 instrument");
    assert_eq!(model.coordinates.as_deref(), Some("64.2561, 19.7712"));
    assert!(model.height.is_none());

    let model = PlatformCardModel::new(&platform, 0, &BuiltinTaxonomy);
    assert_eq!(model.instrument_label, "0 instruments");
}

#[test]
fn unknown_ecosystem_is_neutral() {
    let platform = Platform {
        ecosystem_code: Some("XYZ".to_owned()),
        ..Platform::default()
    };
    let model = PlatformCardModel::new(&platform, 2, &BuiltinTaxonomy);
    assert_eq!(model.ecosystem.color, DEFAULT_COLOR);
    assert_eq!(model.ecosystem.class, "badge badge--xyz");
}
