//! REST API helpers for the auth and verification endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`; the session cookie
//! rides along automatically on same-origin requests.
//! Server-side (SSR) and native tests: every call returns
//! `ApiError::Unavailable` since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Non-2xx responses become
//! `ApiError::Status` carrying the server's `message`. The verification page
//! narrows those into `VerificationError` with `classify_verify_error` and
//! `classify_resend_error`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use super::types::MessageResponse;
use super::types::UserSummary;
use crate::state::session::Session;
use crate::state::verification::{VerificationError, VerificationPurpose};

#[cfg(feature = "hydrate")]
use super::types::{
    BlockRequest, ForgotPasswordRequest, ResendOtpRequest, ResetPasswordRequest, ResetTokenResponse, SessionResponse,
    SignInRequest, SignUpRequest, UserListResponse, VerifyOtpRequest,
};

/// Prefix for every API path; empty means same origin.
const API_BASE: &str = match option_env!("STOREFRONT_API_BASE") {
    Some(base) => base,
    None => "",
};

pub const SIGN_IN_PATH: &str = "/user/signin";
pub const SIGN_UP_PATH: &str = "/user/signup";
pub const ME_PATH: &str = "/user/me";
pub const LOGOUT_PATH: &str = "/user/logout";
pub const VERIFY_OTP_PATH: &str = "/user/verify-otp";
pub const RESEND_OTP_PATH: &str = "/user/resend-otp";
pub const FORGOT_PASSWORD_PATH: &str = "/user/forgot-password";
pub const FORGOT_PASSWORD_VERIFY_PATH: &str = "/user/forgot-password/verify-otp";
pub const RESET_PASSWORD_PATH: &str = "/user/reset-password";
pub const ADMIN_USERS_PATH: &str = "/admin/users";

/// Failure of one API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What a successful code verification yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Sign-up codes sign the user in.
    Session(Session),
    /// Password-reset codes are exchanged for a short-lived reset token.
    ResetToken(String),
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    format!("{API_BASE}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn admin_block_endpoint(email: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(email.as_bytes()).collect();
    endpoint(&format!("{ADMIN_USERS_PATH}/{encoded}/block"))
}

#[must_use]
pub fn verify_path(purpose: VerificationPurpose) -> &'static str {
    match purpose {
        VerificationPurpose::Signup => VERIFY_OTP_PATH,
        VerificationPurpose::ForgotPassword => FORGOT_PASSWORD_VERIFY_PATH,
    }
}

/// Build the error for a non-2xx response from its status and raw body.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<MessageResponse>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

/// Map a verify failure onto the verification taxonomy. Statuses that mean
/// "this code is wrong, expired or used up" are field-level rejections.
#[must_use]
pub fn classify_verify_error(err: ApiError) -> VerificationError {
    match err {
        ApiError::Status { status: 400 | 401 | 410 | 422, message } => VerificationError::Rejected(message),
        ApiError::Status { message, .. } => VerificationError::Network(message),
        other => VerificationError::Network(other.to_string()),
    }
}

/// Every resend failure is a general message.
#[must_use]
pub fn classify_resend_error(err: ApiError) -> VerificationError {
    match err {
        ApiError::Status { message, .. } => VerificationError::ResendFailed(message),
        other => VerificationError::ResendFailed(other.to_string()),
    }
}

// =============================================================================
// transport
// =============================================================================

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(&endpoint(path))
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(&endpoint(path))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

// =============================================================================
// calls
// =============================================================================

/// Sign in with e-mail and password via `POST /user/signin`.
///
/// # Errors
///
/// `Status` 401 for bad credentials, 403 for a blocked account.
pub async fn sign_in(email: &str, password: &str) -> Result<Session, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = SignInRequest { email: email.to_owned(), password: password.to_owned() };
        let resp: SessionResponse = post_json(SIGN_IN_PATH, &body).await?;
        Ok(resp.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::Unavailable)
    }
}

/// Create an account via `POST /user/signup`. The returned session is not yet
/// verified; a sign-up code has been mailed.
///
/// # Errors
///
/// `Status` 409 when the e-mail is taken, 400 for invalid input.
pub async fn sign_up(name: &str, email: &str, password: &str) -> Result<Session, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = SignUpRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() };
        let resp: SessionResponse = post_json(SIGN_UP_PATH, &body).await?;
        Ok(resp.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the current session descriptor from `GET /user/me`.
///
/// # Errors
///
/// `Status` 401 without a valid cookie, 403 for a blocked account.
pub async fn fetch_session() -> Result<Session, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp: SessionResponse = get_json(ME_PATH).await?;
        Ok(resp.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Clear the session cookie via `POST /user/logout`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn sign_out() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let _: MessageResponse = post_json(LOGOUT_PATH, &serde_json::json!({})).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Submit a code for `purpose`.
///
/// # Errors
///
/// `Status` 400/410 for a wrong or expired code, 422 when attempts are used up.
pub async fn verify_otp(purpose: VerificationPurpose, email: &str, otp: &str) -> Result<VerifyOutcome, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = VerifyOtpRequest { email: email.to_owned(), otp: otp.to_owned() };
        match purpose {
            VerificationPurpose::Signup => {
                let resp: SessionResponse = post_json(verify_path(purpose), &body).await?;
                Ok(VerifyOutcome::Session(resp.user))
            }
            VerificationPurpose::ForgotPassword => {
                let resp: ResetTokenResponse = post_json(verify_path(purpose), &body).await?;
                Ok(VerifyOutcome::ResetToken(resp.reset_token))
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (purpose, email, otp);
        Err(ApiError::Unavailable)
    }
}

/// Ask for a new code via `POST /user/resend-otp`.
///
/// # Errors
///
/// `Status` 429 while the server-side cool-down is running.
pub async fn resend_otp(purpose: VerificationPurpose, email: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = ResendOtpRequest { email: email.to_owned(), purpose };
        let _: MessageResponse = post_json(RESEND_OTP_PATH, &body).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (purpose, email);
        Err(ApiError::Unavailable)
    }
}

/// Start a password reset via `POST /user/forgot-password`. The server answers
/// the same way whether or not the address is registered.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn request_password_reset(email: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = ForgotPasswordRequest { email: email.to_owned() };
        let _: MessageResponse = post_json(FORGOT_PASSWORD_PATH, &body).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err(ApiError::Unavailable)
    }
}

/// Set a new password via `POST /user/reset-password`.
///
/// # Errors
///
/// `Status` 401 for an invalid or expired reset token.
pub async fn reset_password(reset_token: &str, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = ResetPasswordRequest { reset_token: reset_token.to_owned(), password: password.to_owned() };
        let _: MessageResponse = post_json(RESET_PASSWORD_PATH, &body).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (reset_token, password);
        Err(ApiError::Unavailable)
    }
}

/// List accounts for the admin dashboard via `GET /admin/users`.
///
/// # Errors
///
/// `Status` 403 for non-admin sessions.
pub async fn list_users() -> Result<Vec<UserSummary>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp: UserListResponse = get_json(ADMIN_USERS_PATH).await?;
        Ok(resp.users)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Block or unblock an account via `POST /admin/users/{email}/block`.
///
/// # Errors
///
/// `Status` 404 for an unknown account.
pub async fn set_user_blocked(email: &str, blocked: bool) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&admin_block_endpoint(email))
            .json(&BlockRequest { blocked })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let _: MessageResponse = read_json(resp).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, blocked);
        Err(ApiError::Unavailable)
    }
}
