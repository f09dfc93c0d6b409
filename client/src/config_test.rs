use super::*;

#[test]
fn defaults_target_same_origin() {
    let config = ClientConfig::default();
    assert_eq!(config.api_url("/api/stations"), "/api/stations");
    assert_eq!(config.search_debounce_ms, 300);
    assert!(config.cluster_markers);
}

#[test]
fn overrides_keep_unspecified_defaults() {
    let config = ClientConfig::from_overrides(r#"{"api_base": "https://api.example.org/", "page_size": 50}"#);
    assert_eq!(config.api_url("/api/stations"), "https://api.example.org/api/stations");
    assert_eq!(config.page_size, 50);
    assert_eq!(config.login_url, "/login.html");
}

#[test]
fn invalid_overrides_fall_back_to_defaults() {
    assert_eq!(ClientConfig::from_overrides("{not json"), ClientConfig::default());
}
