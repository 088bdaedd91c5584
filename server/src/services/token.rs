//! Signed session and password-reset tokens (HS256 JWT).
//!
//! DESIGN
//! ======
//! Both token kinds share one key and one claim layout; `purpose` keeps them
//! apart so a reset token can never be replayed as a session and vice versa.
//! Reset tokens also carry a `jti` that is consumed on first use. A consumed
//! `jti` is remembered until its token could no longer decode anyway.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use client::state::session::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Clock skew accepted on `exp`; a consumed `jti` is kept this long past expiry.
const EXP_LEEWAY_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    PasswordReset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Normalized e-mail of the account.
    pub sub: String,
    pub role: Role,
    pub purpose: TokenPurpose,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(String),
    #[error("invalid or expired token")]
    Invalid,
    #[error("token used for the wrong purpose")]
    WrongPurpose,
    #[error("token already used")]
    Consumed,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl: Duration,
    reset_ttl: Duration,
    /// Consumed reset `jti` -> token `exp`.
    consumed: Mutex<HashMap<String, i64>>,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, session_ttl: Duration, reset_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl,
            reset_ttl,
            consumed: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// # Errors
    ///
    /// `Encode` if signing fails.
    pub fn issue(&self, sub: &str, role: Role, purpose: TokenPurpose) -> Result<String, TokenError> {
        self.issue_at(sub, role, purpose, OffsetDateTime::now_utc())
    }

    /// # Errors
    ///
    /// `Encode` if signing fails.
    pub fn issue_at(&self, sub: &str, role: Role, purpose: TokenPurpose, now: OffsetDateTime) -> Result<String, TokenError> {
        let ttl = match purpose {
            TokenPurpose::Session => self.session_ttl,
            TokenPurpose::PasswordReset => self.reset_ttl,
        };
        let iat = now.unix_timestamp();
        let exp = iat.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
        let claims = Claims { sub: sub.to_owned(), role, purpose, jti: Uuid::new_v4().to_string(), iat, exp };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Validate signature, expiry and purpose.
    ///
    /// # Errors
    ///
    /// `Invalid` or `WrongPurpose`.
    pub fn decode(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = EXP_LEEWAY_SECS;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|_| TokenError::Invalid)?;
        if data.claims.purpose != purpose {
            return Err(TokenError::WrongPurpose);
        }
        Ok(data.claims)
    }

    /// Decode a password-reset token and mark it used.
    ///
    /// # Errors
    ///
    /// As [`TokenService::decode`], plus `Consumed` on reuse.
    pub fn consume_reset(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode(token, TokenPurpose::PasswordReset)?;
        let mut consumed = self.consumed.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if consumed.contains_key(&claims.jti) {
            return Err(TokenError::Consumed);
        }
        consumed.insert(claims.jti.clone(), claims.exp);
        Ok(claims)
    }

    /// Forget consumed `jti`s whose tokens can no longer decode. Returns how
    /// many were removed.
    pub fn purge_consumed(&self) -> usize {
        self.purge_consumed_at(OffsetDateTime::now_utc())
    }

    pub fn purge_consumed_at(&self, now: OffsetDateTime) -> usize {
        let cutoff = now.unix_timestamp().saturating_sub(i64::try_from(EXP_LEEWAY_SECS).unwrap_or(i64::MAX));
        let mut consumed = self.consumed.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = consumed.len();
        consumed.retain(|_, exp| *exp >= cutoff);
        before - consumed.len()
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
