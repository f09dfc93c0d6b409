use super::*;

#[test]
fn station_paths_encode_acronym() {
    assert_eq!(station("SVB"), "/api/stations/SVB");
    assert_eq!(station_aoi("a b"), "/api/stations/a%20b/aoi");
    assert_eq!(platforms("ANS"), "/api/platforms?station=ANS");
    assert_eq!(instruments("LON/x"), "/api/instruments?station=LON%2Fx");
}

#[test]
fn item_paths_use_ids() {
    assert_eq!(instrument(12), "/api/instruments/12");
    assert_eq!(instrument_rois(12), "/api/instruments/12/rois");
    assert_eq!(product(3), "/api/latest/products/3");
    assert_eq!(campaign(9), "/api/v3/campaigns/9");
    assert_eq!(maintenance_record(5), "/api/v3/maintenance/5");
}

#[test]
fn campaign_query_includes_only_present_filters() {
    let query = CampaignQuery {
        page: 2,
        per_page: 20,
        station: Some("SVB".to_owned()),
        status: Some(String::new()),
        campaign_type: Some("field campaign".to_owned()),
    };
    assert_eq!(
        campaigns(&query),
        "/api/v3/campaigns?page=2&per_page=20&station=SVB&campaign_type=field%20campaign"
    );
}

#[test]
fn campaign_query_clamps_zero_page() {
    assert_eq!(campaigns(&CampaignQuery::default()), "/api/v3/campaigns?page=1&per_page=1");
}

#[test]
fn maintenance_filter_path() {
    assert_eq!(
        maintenance_for("instrument", 4),
        "/api/v3/maintenance?entity_type=instrument&entity_id=4"
    );
}

#[test]
fn save_target_switches_on_id() {
    assert_eq!(save_target(PRODUCTS, None), "/api/latest/products");
    assert_eq!(save_target(PRODUCTS, Some(8)), "/api/latest/products/8");
}

#[test]
fn encode_component_handles_utf8() {
    assert_eq!(encode_component("Ö"), "%C3%96");
    assert_eq!(encode_component("a-b_c.d~"), "a-b_c.d~");
}
