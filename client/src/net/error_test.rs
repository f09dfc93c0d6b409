use super::*;

#[test]
fn unauthorized_is_special_cased() {
    let err = ApiError::from_status(401, r#"{"error": "expired"}"#);
    assert_eq!(err, ApiError::Unauthorized);
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
}

#[test]
fn json_error_body_becomes_message() {
    let err = ApiError::from_status(422, r#"{"message": "name taken"}"#);
    assert_eq!(
        err,
        ApiError::Status {
            status: 422,
            message: "name taken".to_owned()
        }
    );
    assert_eq!(err.to_string(), "request failed (422): name taken");
}

#[test]
fn plain_text_body_is_used_when_short() {
    let err = ApiError::from_status(409, "  stale version ");
    assert_eq!(err.to_string(), "request failed (409): stale version");
}

#[test]
fn html_or_empty_body_falls_back_to_status_text() {
    let err = ApiError::from_status(500, "<html>oops</html>");
    assert_eq!(err.to_string(), "request failed (500): server error");
    let err = ApiError::from_status(404, "");
    assert_eq!(err.to_string(), "request failed (404): not found");
}

#[test]
fn network_errors_have_no_status() {
    assert_eq!(ApiError::Network("offline".to_owned()).status(), None);
    assert!(!ApiError::Unavailable.is_unauthorized());
}
