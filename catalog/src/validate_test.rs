use super::*;
use crate::taxonomy::BuiltinTaxonomy;

#[test]
fn required_rejects_blank() {
    let mut v = Validator::new();
    assert!(!v.required("name", "Name", "   "));
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.get("name"), Some("Name is required"));
}

#[test]
fn first_message_per_field_wins() {
    let mut v = Validator::new();
    v.required("name", "Name", "");
    v.max_len("name", "Name", "", 0);
    v.fail("name", "later");
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some("Name is required"));
}

#[test]
fn max_len_counts_characters() {
    let mut v = Validator::new();
    v.max_len("name", "Name", "åäö", 3);
    assert!(v.finish().is_ok());

    let mut v = Validator::new();
    v.max_len("name", "Name", "åäöx", 3);
    assert_eq!(v.finish().unwrap_err().get("name"), Some("Name must be at most 3 characters"));
}

#[test]
fn number_parses_and_checks_range() {
    let mut v = Validator::new();
    assert_eq!(v.number("q", "Quality", " 42.5 ", 0.0, 100.0), Some(42.5));
    assert_eq!(v.number("blank", "Blank", "", 0.0, 1.0), None);
    assert_eq!(v.number("high", "High", "101", 0.0, 100.0), None);
    assert_eq!(v.number("nan", "NaN", "abc", 0.0, 100.0), None);
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.get("q"), None);
    assert_eq!(errors.get("blank"), None);
    assert_eq!(errors.get("high"), Some("High must be between 0 and 100"));
    assert_eq!(errors.get("nan"), Some("NaN must be a number"));
}

#[test]
fn whole_number_rejects_negative() {
    let mut v = Validator::new();
    assert_eq!(v.whole_number("size", "Size", "12"), Some(12));
    assert_eq!(v.whole_number("neg", "Neg", "-1"), None);
    assert_eq!(v.finish().unwrap_err().get("neg"), Some("Neg must be a whole number"));
}

#[test]
fn one_of_returns_canonical_key() {
    let mut v = Validator::new();
    let key = v.one_of("status", "Status", "Ongoing", Vocabulary::CampaignStatus, &BuiltinTaxonomy);
    assert_eq!(key.as_deref(), Some("active"));
    let bad = v.one_of("kind", "Type", "party", Vocabulary::CampaignType, &BuiltinTaxonomy);
    assert_eq!(bad, None);
    let errors = v.finish().unwrap_err();
    assert!(errors.get("kind").is_some());
    assert!(errors.get("status").is_none());
}

#[test]
fn url_requires_scheme_and_host() {
    let mut v = Validator::new();
    v.url("a", "A", "https://data.example.org/x");
    v.url("b", "B", "");
    v.url("c", "C", "ftp://example.org");
    v.url("d", "D", "https://");
    v.url("e", "E", "http://exa mple.org");
    let errors = v.finish().unwrap_err();
    assert!(errors.get("a").is_none());
    assert!(errors.get("b").is_none());
    assert!(errors.get("c").is_some());
    assert!(errors.get("d").is_some());
    assert!(errors.get("e").is_some());
}

#[test]
fn date_order_flags_end_before_start() {
    let mut v = Validator::new();
    let start = v.date("start", "Start", "2024-06-10");
    let end = v.date("end", "End", "2024-06-01");
    v.date_order("end", "Start", "End", start, end);
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.get("end"), Some("End must not be before Start"));
}

#[test]
fn date_order_allows_same_instant_and_missing_side() {
    let mut v = Validator::new();
    let start = v.date("start", "Start", "2024-06-10T10:00");
    let end = v.date("end", "End", "2024-06-10T10:00:00");
    v.date_order("end", "Start", "End", start, end);
    v.date_order("end", "Start", "End", start, None);
    assert!(v.finish().is_ok());
}

#[test]
fn invalid_date_is_reported() {
    let mut v = Validator::new();
    assert_eq!(v.date("when", "When", "31/12/2024"), None);
    assert_eq!(v.finish().unwrap_err().get("when"), Some("When is not a valid date"));
}

#[test]
fn errors_display_counts_fields() {
    let mut errors = ValidationErrors::default();
    errors.add("a", "x");
    errors.add("b", "y");
    assert_eq!(errors.to_string(), "2 field(s) failed validation");
    assert_eq!(errors.iter().count(), 2);
}

#[test]
fn one_of_or_kept_passes_the_stored_value_through() {
    let kept = KeptValues::default().with("status", Some(" shelved ")).with("kind", Some("  "));
    assert_eq!(kept.get("status"), Some("shelved"));
    assert_eq!(kept.get("kind"), None);

    let mut v = Validator::new();
    let status = v.one_of_or_kept("status", "Status", "shelved", Vocabulary::CampaignStatus, &BuiltinTaxonomy, kept.get("status"));
    assert_eq!(status.as_deref(), Some("shelved"));
    let known = v.one_of_or_kept("kind", "Type", "Ongoing", Vocabulary::CampaignStatus, &BuiltinTaxonomy, Some("legacy"));
    assert_eq!(known.as_deref(), Some("active"));
    let changed = v.one_of_or_kept("other", "Other", "archived", Vocabulary::CampaignStatus, &BuiltinTaxonomy, kept.get("status"));
    assert_eq!(changed, None);
    let errors = v.finish().unwrap_err();
    assert!(errors.get("other").is_some());
    assert!(errors.get("status").is_none());
}
