//! JSON bodies exchanged with the `/user` and `/admin` API.
//!
//! DESIGN
//! ======
//! Responses that carry a user decode straight into `Session`, which validates
//! role and provider and drops every other descriptor field. Nothing here
//! stores a credential; the session cookie is handled by the browser.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::session::{Role, Session};
use crate::state::verification::VerificationPurpose;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
    pub purpose: VerificationPurpose,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub reset_token: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockRequest {
    pub blocked: bool,
}

/// Body of every response that signs a user in or describes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionResponse {
    pub user: Session,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenResponse {
    pub reset_token: String,
}

/// Plain `{"message": ...}` body used by acknowledgements and errors alike.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// One row of the admin user listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_blocked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}
