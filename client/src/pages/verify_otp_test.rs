use super::*;
use crate::state::session::{Provider, Role, Session};

#[test]
fn resend_label_counts_down_in_minutes_and_seconds() {
    assert_eq!(resend_label(30), "Resend code in 0:30");
    assert_eq!(resend_label(5), "Resend code in 0:05");
    assert_eq!(resend_label(90), "Resend code in 1:30");
}

#[test]
fn resend_label_is_plain_when_enabled() {
    assert_eq!(resend_label(0), "Resend code");
}

#[test]
fn heading_follows_purpose() {
    assert_eq!(heading(VerificationPurpose::Signup), "Verify your email");
    assert_eq!(heading(VerificationPurpose::ForgotPassword), "Reset your password");
}

#[test]
fn verified_signup_lands_on_role_home() {
    let admin = Session { role: Role::Admin, is_verified: true, is_blocked: false, provider: Provider::Local };
    assert_eq!(route_after_verify(&VerifyOutcome::Session(admin)), "/admin/dashboard");
    let user = Session { role: Role::User, ..admin };
    assert_eq!(route_after_verify(&VerifyOutcome::Session(user)), "/home");
}

#[test]
fn verified_reset_code_opens_reset_form() {
    assert_eq!(route_after_verify(&VerifyOutcome::ResetToken("t".into())), "/reset-password");
}
