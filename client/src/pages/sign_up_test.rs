use super::*;

#[test]
fn validate_sign_up_input_trims_name_and_normalizes_email() {
    assert_eq!(
        validate_sign_up_input("  Ada  ", "Ada@Example.com", "password1", "password1"),
        Ok(SignUpInput { name: "Ada".to_owned(), email: "ada@example.com".to_owned(), password: "password1".to_owned() })
    );
}

#[test]
fn validate_sign_up_input_reports_first_problem() {
    assert_eq!(validate_sign_up_input(" ", "bad", "x", "y"), Err("Enter your name."));
    assert_eq!(validate_sign_up_input("Ada", "bad", "x", "y"), Err("Enter a valid email address."));
    assert_eq!(
        validate_sign_up_input("Ada", "a@b.com", "x", "x"),
        Err("Password must be at least 8 characters.")
    );
    assert_eq!(
        validate_sign_up_input("Ada", "a@b.com", "password1", "password2"),
        Err("Passwords do not match.")
    );
}
