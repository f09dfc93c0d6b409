use super::*;

#[test]
fn date_only_parses_to_midnight() {
    let ts = parse_timestamp("2024-05-01").expect("date");
    assert_eq!(ts.date().to_string(), "2024-05-01");
    assert_eq!(ts.time(), Time::MIDNIGHT);
}

#[test]
fn datetime_local_and_api_forms_parse() {
    let a = parse_timestamp("2024-05-01T08:30").expect("local");
    let b = parse_timestamp("2024-05-01T08:30:00").expect("seconds");
    let c = parse_timestamp("2024-05-01 08:30:00.123Z").expect("zulu");
    let d = parse_timestamp("2024-05-01T08:30:00+02:00").expect("offset");
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(c, d);
}

#[test]
fn malformed_dates_are_rejected() {
    for raw in ["", "2024", "2024-13-01", "2024-05-01X08:30", "2024-05-01T8:30", "yesterday"] {
        assert!(parse_timestamp(raw).is_err(), "{raw:?} should fail");
    }
}

#[test]
fn ordering_follows_time() {
    let start = parse_timestamp("2024-05-01T08:00").expect("start");
    let end = parse_timestamp("2024-04-30").expect("end");
    assert!(end < start);
}

#[test]
fn optional_blank_is_none() {
    assert_eq!(parse_optional(None).expect("none"), None);
    assert_eq!(parse_optional(Some("  ")).expect("blank"), None);
    assert!(parse_optional(Some("nope")).is_err());
}

#[test]
fn display_helpers_fall_back_to_raw() {
    assert_eq!(display_date("2024-05-01T08:30:00Z"), "2024-05-01");
    assert_eq!(display_datetime("2024-05-01T08:30:00Z"), "2024-05-01 08:30");
    assert_eq!(display_date("unknown"), "unknown");
    assert_eq!(to_datetime_local("2024-05-01 08:30:59"), "2024-05-01T08:30");
    assert_eq!(to_datetime_local(""), "");
}
