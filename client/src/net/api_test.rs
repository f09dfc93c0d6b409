use futures::executor::block_on;

use super::*;

#[test]
fn save_method_depends_on_id() {
    assert_eq!(Method::for_save(None), Method::Post);
    assert_eq!(Method::for_save(Some(4)), Method::Put);
}

#[test]
fn decode_list_accepts_both_shapes() {
    let bare: ListResponse<Station> = decode_list(r#"[{"id": 1, "acronym": "SVB"}]"#).unwrap();
    assert_eq!(bare.items()[0].acronym, "SVB");

    let env: ListResponse<Station> =
        decode_list(r#"{"data": [{"id": 2, "acronym": "ANS"}], "meta": {"page": 1}}"#).unwrap();
    assert_eq!(env.items()[0].id, 2);
    assert_eq!(env.meta().and_then(|m| m.page), Some(1));
}

#[test]
fn decode_list_reports_decode_error() {
    let err = decode_list::<Station>(r#"{"nope": true}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn decode_item_unwraps_data() {
    let wrapped: Station = decode_item(r#"{"data": {"id": 7, "acronym": "LON"}}"#).unwrap();
    let bare: Station = decode_item(r#"{"id": 7, "acronym": "LON"}"#).unwrap();
    assert_eq!(wrapped, bare);
}

#[test]
fn native_build_has_no_transport() {
    let api = HttpApi::new(ClientConfig::default());
    assert_eq!(block_on(api.stations()), Err(ApiError::Unavailable));
    assert_eq!(block_on(api.delete_product(1)), Err(ApiError::Unavailable));
}

#[test]
fn missing_token_fails_verification() {
    let api = HttpApi::new(ClientConfig::default());
    assert_eq!(block_on(api.verify_session()), Err(ApiError::Unauthorized));
}
