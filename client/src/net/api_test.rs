use super::*;

#[test]
fn endpoint_prefixes_api_base() {
    assert_eq!(endpoint(SIGN_IN_PATH), format!("{API_BASE}/user/signin"));
}

#[test]
fn admin_block_endpoint_encodes_email() {
    assert_eq!(
        admin_block_endpoint("a+b@example.com"),
        format!("{API_BASE}/admin/users/a%2Bb%40example.com/block")
    );
}

#[test]
fn verify_path_follows_purpose() {
    assert_eq!(verify_path(VerificationPurpose::Signup), "/user/verify-otp");
    assert_eq!(verify_path(VerificationPurpose::ForgotPassword), "/user/forgot-password/verify-otp");
}

#[test]
fn status_error_uses_server_message() {
    let err = status_error(400, r#"{"message":"Invalid code"}"#);
    assert_eq!(err, ApiError::Status { status: 400, message: "Invalid code".to_owned() });
    assert_eq!(err.to_string(), "Invalid code");
    assert_eq!(err.status(), Some(400));
}

#[test]
fn status_error_falls_back_for_unparseable_body() {
    assert_eq!(status_error(502, "<html>").to_string(), "request failed: 502");
    assert_eq!(status_error(500, r#"{"message":"  "}"#).to_string(), "request failed: 500");
}

#[test]
fn rejected_statuses_are_field_level() {
    for status in [400, 401, 410, 422] {
        let err = classify_verify_error(ApiError::Status { status, message: "Invalid code".into() });
        assert_eq!(err, VerificationError::Rejected("Invalid code".into()));
        assert!(err.is_field_level());
    }
}

#[test]
fn other_verify_failures_are_general() {
    let err = classify_verify_error(ApiError::Status { status: 500, message: "boom".into() });
    assert_eq!(err, VerificationError::Network("boom".into()));
    let err = classify_verify_error(ApiError::Network("offline".into()));
    assert_eq!(err, VerificationError::Network("network error: offline".into()));
    assert!(!err.is_field_level());
}

#[test]
fn resend_failures_keep_server_message() {
    let err = classify_resend_error(ApiError::Status { status: 429, message: "Wait 12 seconds".into() });
    assert_eq!(err, VerificationError::ResendFailed("Wait 12 seconds".into()));
    assert_eq!(
        classify_resend_error(ApiError::Unavailable),
        VerificationError::ResendFailed("not available on server".into())
    );
}

#[test]
fn non_status_errors_have_no_status() {
    assert_eq!(ApiError::Decode("x".into()).status(), None);
    assert_eq!(ApiError::Unavailable.status(), None);
}
