//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Accounts, outstanding codes and the token signer all live in memory;
//! every field is `Arc`-wrapped so cloning per request is cheap.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::mailer::OtpMailer;
use crate::services::otp::OtpStore;
use crate::services::token::TokenService;
use crate::services::users::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AuthConfig>,
    pub users: Arc<UserStore>,
    pub otps: Arc<OtpStore>,
    pub tokens: Arc<TokenService>,
    /// Delivery channel for one-time codes.
    pub mailer: Arc<dyn OtpMailer>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AuthConfig, mailer: Arc<dyn OtpMailer>) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.session_ttl, config.reset_token_ttl);
        Self {
            users: Arc::new(UserStore::new()),
            otps: Arc::new(OtpStore::new(config.otp)),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
            mailer,
        }
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
