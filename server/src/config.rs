//! Process configuration read from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy`, then builds one `AuthConfig` that is
//! shared by every service. Unset or unparsable values fall back to defaults;
//! only a missing `JWT_SECRET` is worth a warning.

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
const DEFAULT_RESET_TOKEN_TTL_SECS: u64 = 900;
const DEFAULT_OTP_TTL_SECS: u64 = 600;
const DEFAULT_OTP_RESEND_COOLDOWN_SECS: u64 = 30;
const DEFAULT_OTP_MAX_ATTEMPTS: u32 = 5;

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// One-time code policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpSettings {
    pub ttl: Duration,
    pub resend_cooldown: Duration,
    pub max_attempts: u32,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_OTP_TTL_SECS),
            resend_cooldown: Duration::from_secs(DEFAULT_OTP_RESEND_COOLDOWN_SECS),
            max_attempts: DEFAULT_OTP_MAX_ATTEMPTS,
        }
    }
}

/// Resend e-mail API credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResendSettings {
    pub api_key: String,
    pub from: String,
}

/// Admin account created at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub session_ttl: Duration,
    pub reset_token_ttl: Duration,
    pub otp: OtpSettings,
    pub cookie_secure: bool,
    /// Log issued codes in clear text (development only).
    pub echo_codes: bool,
    pub resend: Option<ResendSettings>,
    pub admin: Option<AdminSeed>,
}

impl AuthConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let jwt_secret = env_string("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using a random per-process secret (sessions end on restart)");
            random_secret()
        });

        let resend = match (env_string("RESEND_API_KEY"), env_string("RESEND_FROM")) {
            (Some(api_key), Some(from)) => Some(ResendSettings { api_key, from }),
            _ => None,
        };
        let admin = match (env_string("ADMIN_EMAIL"), env_string("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            jwt_secret,
            session_ttl: Duration::from_secs(env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
            reset_token_ttl: Duration::from_secs(env_parse("RESET_TOKEN_TTL_SECS", DEFAULT_RESET_TOKEN_TTL_SECS)),
            otp: OtpSettings {
                ttl: Duration::from_secs(env_parse("OTP_TTL_SECS", DEFAULT_OTP_TTL_SECS)),
                resend_cooldown: Duration::from_secs(env_parse(
                    "OTP_RESEND_COOLDOWN_SECS",
                    DEFAULT_OTP_RESEND_COOLDOWN_SECS,
                )),
                max_attempts: env_parse("OTP_MAX_ATTEMPTS", DEFAULT_OTP_MAX_ATTEMPTS).max(1),
            },
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            echo_codes: env_bool("OTP_ECHO_CODES").unwrap_or(false),
            resend,
            admin,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: random_secret(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            reset_token_ttl: Duration::from_secs(DEFAULT_RESET_TOKEN_TTL_SECS),
            otp: OtpSettings::default(),
            cookie_secure: false,
            echo_codes: false,
            resend: None,
            admin: None,
        }
    }
}

fn random_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
