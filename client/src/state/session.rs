//! Client-side session record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard and identity-aware pages only need four attributes of the
//! signed-in user. Everything else the server sends (ids, e-mail, names) is
//! dropped at the boundary, and the bearer credential never leaves its
//! `HttpOnly` cookie.
//!
//! DESIGN
//! ======
//! `Session` deserializes through a string-typed shape so unknown roles and
//! providers are rejected instead of being carried around as raw strings.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authorization role of the signed-in user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(SessionParseError::UnknownRole(raw.to_owned())),
        }
    }
}

/// Identity provider the account signed in with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Local,
    Google,
}

impl FromStr for Provider {
    type Err = SessionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "google" => Ok(Self::Google),
            _ => Err(SessionParseError::UnknownProvider(raw.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionParseError {
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
    #[error("unknown provider: {0:?}")]
    UnknownProvider(String),
}

/// Authorization-relevant view of the signed-in user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSession")]
pub struct Session {
    pub role: Role,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub provider: Provider,
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Untrusted wire shape of a session descriptor.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    role: String,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    is_blocked: bool,
    #[serde(default)]
    provider: Option<String>,
}

impl TryFrom<RawSession> for Session {
    type Error = SessionParseError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        let provider = match raw.provider.as_deref() {
            Some(value) => value.parse()?,
            None => Provider::default(),
        };
        Ok(Self {
            role: raw.role.parse()?,
            is_verified: raw.is_verified,
            is_blocked: raw.is_blocked,
            provider,
        })
    }
}

/// Parse a session descriptor from a JSON document.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or names an unknown role or provider.
pub fn parse_session(raw: &str) -> Result<Session, serde_json::Error> {
    serde_json::from_str(raw)
}
