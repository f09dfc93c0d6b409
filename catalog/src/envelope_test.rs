use super::*;
use crate::model::Campaign;

#[test]
fn enveloped_list_exposes_meta_and_links() {
    let raw = r#"{
        "data": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
        "meta": {"page": 1, "per_page": 2, "total": 5},
        "links": {"next": "/api/v3/campaigns?page=2", "prev": null}
    }"#;
    let resp = ListResponse::<Campaign>::from_json(raw).expect("list");
    assert_eq!(resp.items().len(), 2);
    let meta = resp.meta().expect("meta");
    assert_eq!(meta.page, Some(1));
    assert_eq!(meta.page_count(), Some(3));
    assert_eq!(
        resp.links().and_then(|l| l.next.as_deref()),
        Some("/api/v3/campaigns?page=2")
    );
}

#[test]
fn bare_array_has_no_meta() {
    let resp = ListResponse::<Campaign>::from_json(r#"[{"id": 3, "name": "C"}]"#).expect("list");
    assert_eq!(resp.items()[0].id, 3);
    assert!(resp.meta().is_none());
    assert!(resp.links().is_none());
}

#[test]
fn empty_envelope_and_empty_array_both_decode() {
    let enveloped = ListResponse::<Campaign>::from_json(r#"{"data": []}"#).expect("env");
    assert!(enveloped.items().is_empty());
    let bare = ListResponse::<Campaign>::from_json("[]").expect("bare");
    assert!(bare.into_items().is_empty());
}

#[test]
fn garbage_is_a_decode_error() {
    let err = ListResponse::<Campaign>::from_json(r#"{"rows": []}"#).unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[test]
fn meta_aliases_limit_and_count() {
    let meta: ListMeta = serde_json::from_str(r#"{"limit": 10, "count": 21}"#).expect("meta");
    assert_eq!(meta.per_page, Some(10));
    assert_eq!(meta.page_count(), Some(3));
}

#[test]
fn explicit_total_pages_wins() {
    let meta = ListMeta {
        total_pages: Some(9),
        total: Some(1),
        per_page: Some(1),
        page: None,
    };
    assert_eq!(meta.page_count(), Some(9));
}

#[test]
fn page_count_needs_positive_page_size() {
    let meta = ListMeta {
        total: Some(5),
        per_page: Some(0),
        ..ListMeta::default()
    };
    assert_eq!(meta.page_count(), None);
}

#[test]
fn item_response_unwraps_both_shapes() {
    let wrapped: ItemResponse<Campaign> =
        serde_json::from_str(r#"{"data": {"id": 4, "name": "D"}}"#).expect("wrapped");
    assert_eq!(wrapped.into_inner().id, 4);
    let bare: ItemResponse<Campaign> = serde_json::from_str(r#"{"id": 5, "name": "E"}"#).expect("bare");
    assert_eq!(bare.into_inner().name, "E");
}

#[test]
fn error_body_prefers_error_then_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).expect("body");
    assert_eq!(body.text(), Some("nope"));
    let body: ErrorBody = serde_json::from_str(r#"{"error": "bad", "message": "nope"}"#).expect("body");
    assert_eq!(body.text(), Some("bad"));
    assert_eq!(ErrorBody::default().text(), None);
}
