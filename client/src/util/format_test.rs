use super::*;

#[test]
fn placeholder_for_blank_text() {
    assert_eq!(text_or_placeholder(None), NOT_SET);
    assert_eq!(text_or_placeholder(Some("  ")), NOT_SET);
    assert_eq!(text_or_placeholder(Some(" Nikon ")), "Nikon");
}

#[test]
fn coordinates_need_both_values() {
    assert_eq!(coordinates(Some(68.354_21), Some(19.045_2)).as_deref(), Some("68.3542, 19.0452"));
    assert_eq!(coordinates(Some(68.0), None), None);
    assert_eq!(coordinates(Some(f64::NAN), Some(1.0)), None);
}

#[test]
fn meters_and_degrees() {
    assert_eq!(meters(Some(12.0)).as_deref(), Some("12 m"));
    assert_eq!(meters(Some(4.3)).as_deref(), Some("4.3 m"));
    assert_eq!(degrees(Some(45.0)).as_deref(), Some("45°"));
    assert_eq!(meters(None), None);
}

#[test]
fn file_size_units() {
    assert_eq!(file_size(512), "512 B");
    assert_eq!(file_size(1536), "1.5 KB");
    assert_eq!(file_size(5 * 1024 * 1024), "5.0 MB");
}

#[test]
fn roi_count_labels() {
    assert_eq!(roi_count(None), "No ROIs");
    assert_eq!(roi_count(Some(1)), "1 ROI");
    assert_eq!(roi_count(Some(4)), "4 ROIs");
}

#[test]
fn date_range_open_ends() {
    assert_eq!(date_range(None, None), NOT_SET);
    assert_eq!(
        date_range(Some("2024-05-01T08:00:00Z"), None),
        "2024-05-01 → TBD"
    );
    assert_eq!(
        date_range(Some("2024-05-01"), Some("2024-05-03")),
        "2024-05-01 → 2024-05-03"
    );
}

#[test]
fn quality_rounds() {
    assert_eq!(quality(Some(87.6)).as_deref(), Some("88%"));
    assert_eq!(quality(None), None);
}
