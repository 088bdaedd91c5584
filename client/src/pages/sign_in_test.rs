use super::*;
use crate::state::session::{Provider, Role};

fn session(role: Role, is_verified: bool) -> Session {
    Session { role, is_verified, is_blocked: false, provider: Provider::Local }
}

#[test]
fn validate_sign_in_input_normalizes_email() {
    assert_eq!(
        validate_sign_in_input(" A@B.com ", "secret"),
        Ok(("a@b.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_sign_in_input_requires_password() {
    assert_eq!(validate_sign_in_input("a@b.com", ""), Err("Enter your password."));
    assert_eq!(validate_sign_in_input("", "secret"), Err("Enter your email address."));
}

#[test]
fn verified_users_land_on_role_home() {
    assert_eq!(landing_after_sign_in(&session(Role::User, true), "a@b.com"), "/home");
    assert_eq!(landing_after_sign_in(&session(Role::Admin, true), "a@b.com"), "/admin/dashboard");
}

#[test]
fn unverified_users_go_to_verification() {
    assert_eq!(
        landing_after_sign_in(&session(Role::User, false), "a@b.com"),
        "/verify-otp?email=a%40b.com&purpose=signup"
    );
}
