//! Account routes under `/user`: sign-up, sign-in, code verification,
//! password reset and the session cookie.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::state::verification::VerificationPurpose;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::services::otp::OtpError;
use crate::services::token::TokenPurpose;
use crate::services::users::{User, UserDescriptor, UserError, check_password, normalize_email};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "storefront_session";

/// Same reply whether or not the address is known.
const CODE_SENT_MESSAGE: &str = "If the account exists, a code has been sent.";

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let ttl = i64::try_from(state.config.session_ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(time::Duration::seconds(ttl))
        .build()
}

fn cleared_session_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(time::Duration::ZERO)
        .build()
}

fn sign_in_jar(state: &AppState, jar: CookieJar, user: &User) -> Result<CookieJar, ApiError> {
    let token = state.tokens.issue(&user.email, user.role, TokenPurpose::Session)?;
    Ok(jar.add(session_cookie(state, token)))
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Signed-in, unblocked user resolved from the session cookie.
///
/// The account is re-read on every request, so a block or role change takes
/// effect immediately even though the cookie itself is stateless.
pub struct AuthUser {
    pub user: User,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Unauthorized("Not signed in".to_owned()));
        }

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .tokens
            .decode(token, TokenPurpose::Session)
            .map_err(|_| ApiError::Unauthorized("Session expired".to_owned()))?;
        let user = app_state
            .users
            .find(&claims.sub)
            .await
            .ok_or_else(|| ApiError::Unauthorized("Session expired".to_owned()))?;
        if user.is_blocked {
            return Err(UserError::Blocked.into());
        }
        Ok(Self { user })
    }
}

// =============================================================================
// CODE DELIVERY
// =============================================================================

/// Issue a code and mail it. A failed delivery revokes the code so the
/// caller can retry without waiting out the cool-down.
pub(crate) async fn deliver_code(state: &AppState, email: &str, purpose: VerificationPurpose) -> Result<(), ApiError> {
    let code = state.otps.issue(email, purpose)?;
    if let Err(err) = state.mailer.send_code(email, purpose, &code).await {
        state.otps.revoke(email, purpose);
        return Err(err.into());
    }
    tracing::info!(%email, purpose = purpose.as_str(), "verification code sent");
    Ok(())
}

/// Delivery that must not fail the surrounding request.
async fn deliver_code_quietly(state: &AppState, email: &str, purpose: VerificationPurpose) {
    match deliver_code(state, email, purpose).await {
        Ok(()) | Err(ApiError::TooManyRequests { .. }) => {}
        Err(err) => tracing::warn!(%email, purpose = purpose.as_str(), error = %err, "code delivery failed"),
    }
}

fn parse_email(raw: &str) -> Result<String, ApiError> {
    normalize_email(raw).ok_or_else(|| UserError::InvalidEmail.into())
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserDescriptor,
}

impl From<&User> for UserEnvelope {
    fn from(user: &User) -> Self {
        Self { user: user.descriptor() }
    }
}

#[derive(Deserialize)]
pub struct SignUpBody {
    name: String,
    email: String,
    password: String,
}

/// `POST /user/signup`: create an unverified account, sign it in and mail a
/// verification code.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignUpBody>,
) -> Result<(StatusCode, CookieJar, Json<UserEnvelope>), ApiError> {
    let user = state.users.sign_up(&body.name, &body.email, &body.password).await?;
    tracing::info!(email = %user.email, "account created");
    deliver_code_quietly(&state, &user.email, VerificationPurpose::Signup).await;
    let jar = sign_in_jar(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, Json(UserEnvelope::from(&user))))
}

#[derive(Deserialize)]
pub struct SignInBody {
    email: String,
    password: String,
}

/// `POST /user/signin`. Unverified accounts are signed in too, and get a
/// fresh code unless one was sent moments ago.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInBody>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    let user = state.users.authenticate(&body.email, &body.password).await?;
    if !user.is_verified {
        deliver_code_quietly(&state, &user.email, VerificationPurpose::Signup).await;
    }
    let jar = sign_in_jar(&state, jar, &user)?;
    Ok((jar, Json(UserEnvelope::from(&user))))
}

/// `GET /user/me`
pub async fn me(auth: AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope::from(&auth.user))
}

/// `POST /user/logout`: clear the cookie. Works without a valid session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.add(cleared_session_cookie(&state)), Json(json!({ "message": "Signed out" })))
}

#[derive(Deserialize)]
pub struct VerifyOtpBody {
    email: String,
    otp: String,
}

/// `POST /user/verify-otp`: confirm a sign-up code.
pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtpBody>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    let email = parse_email(&body.email)?;
    state.otps.verify(&email, VerificationPurpose::Signup, &body.otp)?;
    let user = state.users.mark_verified(&email).await?;
    if user.is_blocked {
        return Err(UserError::Blocked.into());
    }
    tracing::info!(%email, "email verified");
    let jar = sign_in_jar(&state, jar, &user)?;
    Ok((jar, Json(UserEnvelope::from(&user))))
}

#[derive(Deserialize)]
pub struct ResendOtpBody {
    email: String,
    purpose: VerificationPurpose,
}

/// `POST /user/resend-otp`. Cool-down and delivery failures are reported;
/// unknown or ineligible accounts get the generic acknowledgement.
pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<ResendOtpBody>,
) -> Result<Json<Value>, ApiError> {
    let email = parse_email(&body.email)?;
    let eligible = state.users.find(&email).await.is_some_and(|user| match body.purpose {
        VerificationPurpose::Signup => !user.is_verified && !user.is_blocked,
        VerificationPurpose::ForgotPassword => !user.is_blocked,
    });
    if eligible {
        deliver_code(&state, &email, body.purpose).await?;
    }
    Ok(Json(json!({ "message": CODE_SENT_MESSAGE })))
}

#[derive(Deserialize)]
pub struct ForgotPasswordBody {
    email: String,
}

/// `POST /user/forgot-password`: always acknowledges, so the response does
/// not reveal whether the address is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordBody>,
) -> Result<Json<Value>, ApiError> {
    let email = parse_email(&body.email)?;
    if state.users.find(&email).await.is_some_and(|user| !user.is_blocked) {
        deliver_code_quietly(&state, &email, VerificationPurpose::ForgotPassword).await;
    }
    Ok(Json(json!({ "message": CODE_SENT_MESSAGE })))
}

/// `POST /user/forgot-password/verify-otp`: trade a reset code for a
/// short-lived, single-use reset token.
pub async fn forgot_password_verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<Json<Value>, ApiError> {
    let email = parse_email(&body.email)?;
    state.otps.verify(&email, VerificationPurpose::ForgotPassword, &body.otp)?;
    let user = state.users.find(&email).await.ok_or(OtpError::Missing)?;
    if user.is_blocked {
        return Err(UserError::Blocked.into());
    }
    let token = state.tokens.issue(&user.email, user.role, TokenPurpose::PasswordReset)?;
    Ok(Json(json!({ "resetToken": token })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    reset_token: String,
    password: String,
}

/// `POST /user/reset-password`. The password is checked before the token is
/// burned, so a too-short password can be retried with the same link.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Json<Value>, ApiError> {
    state.tokens.decode(&body.reset_token, TokenPurpose::PasswordReset)?;
    check_password(&body.password)?;
    let claims = state.tokens.consume_reset(&body.reset_token)?;
    let user = state.users.find(&claims.sub).await.ok_or(UserError::NotFound)?;
    if user.is_blocked {
        return Err(UserError::Blocked.into());
    }
    state.users.set_password(&user.email, &body.password).await?;
    tracing::info!(email = %user.email, "password reset");
    Ok(Json(json!({ "message": "Password updated" })))
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
