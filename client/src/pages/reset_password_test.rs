use super::*;

#[test]
fn validate_reset_input_requires_token() {
    let expired = Err("Your reset session has expired. Request a new code.");
    assert_eq!(validate_reset_input(None, "password1", "password1"), expired);
    assert_eq!(validate_reset_input(Some(""), "password1", "password1"), expired);
}

#[test]
fn validate_reset_input_checks_password() {
    assert_eq!(
        validate_reset_input(Some("tok"), "short", "short"),
        Err("Password must be at least 8 characters.")
    );
    assert_eq!(validate_reset_input(Some("tok"), "password1", "password1"), Ok("tok".to_owned()));
}
