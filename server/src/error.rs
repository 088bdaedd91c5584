//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Bodies are always
//! `{"message": ...}` so the client can surface them verbatim.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::mailer::MailError;
use crate::services::otp::OtpError;
use crate::services::token::TokenError;
use crate::services::users::UserError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Gone(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("Please wait {retry_after_secs} seconds before requesting a new code")]
    TooManyRequests { retry_after_secs: u64 },
    #[error("{0}")]
    BadGateway(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Gone(_) => StatusCode::GONE,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "Internal server error".to_owned()
            }
            Self::BadGateway(detail) => {
                tracing::warn!(%detail, "upstream failure");
                "Could not send the code. Try again shortly.".to_owned()
            }
            other => other.to_string(),
        };
        let mut response = (status, Json(json!({ "message": message }))).into_response();
        if let Self::TooManyRequests { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail | UserError::InvalidName | UserError::InvalidPassword => {
                Self::BadRequest(err.to_string())
            }
            UserError::EmailTaken => Self::Conflict(err.to_string()),
            UserError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            UserError::Blocked => Self::Forbidden(err.to_string()),
            UserError::NotFound => Self::NotFound(err.to_string()),
            UserError::Hash(detail) => Self::Internal(detail),
        }
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::InvalidCode => Self::BadRequest("Invalid verification code".to_owned()),
            OtpError::Missing => Self::Gone("No active code. Request a new one.".to_owned()),
            OtpError::Expired => Self::Gone("Code expired. Request a new one.".to_owned()),
            OtpError::TooManyAttempts => Self::Unprocessable("Too many attempts. Request a new code.".to_owned()),
            OtpError::Cooldown { retry_after_secs } => Self::TooManyRequests { retry_after_secs },
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encode(detail) => Self::Internal(detail),
            TokenError::Invalid | TokenError::WrongPurpose | TokenError::Consumed => {
                Self::Unauthorized("Reset link is invalid or has expired".to_owned())
            }
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        Self::BadGateway(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
