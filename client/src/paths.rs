//! Route paths shared by the router, the guard, and page navigation.

pub const ROOT: &str = "/";
pub const SIGN_IN: &str = "/sign-in";
pub const SIGN_UP: &str = "/sign-up";
/// Default landing route for every non-admin session.
pub const HOME: &str = "/home";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const VERIFY_OTP: &str = "/verify-otp";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const RESET_PASSWORD: &str = "/reset-password";

#[cfg(test)]
#[path = "paths_test.rs"]
mod paths_test;

use crate::state::verification::VerificationPurpose;

/// Link to the verification page for `email` and `purpose`.
#[must_use]
pub fn verify_otp_href(email: &str, purpose: VerificationPurpose) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("email", email)
        .append_pair("purpose", purpose.as_str())
        .finish();
    format!("{VERIFY_OTP}?{query}")
}
