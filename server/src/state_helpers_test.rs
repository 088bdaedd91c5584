use super::*;
use std::sync::Mutex;

use async_trait::async_trait;
use client::state::verification::VerificationPurpose;

use crate::services::mailer::MailError;

/// Mailer that records every code instead of sending it.
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<(String, VerificationPurpose, String)>>,
    fail: bool,
}

impl CapturingMailer {
    #[must_use]
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    /// Most recent code delivered to `email` for `purpose`.
    #[must_use]
    pub fn last_code(&self, email: &str, purpose: VerificationPurpose) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, p, _)| to == email && *p == purpose)
            .map(|(_, _, code)| code.clone())
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl OtpMailer for CapturingMailer {
    async fn send_code(&self, to: &str, purpose: VerificationPurpose, code: &str) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Delivery("mailer offline".into()));
        }
        self.sent.lock().unwrap().push((to.to_owned(), purpose, code.to_owned()));
        Ok(())
    }
}

/// Test `AppState` with a fixed secret and a capturing mailer.
#[must_use]
pub fn test_app_state() -> (AppState, Arc<CapturingMailer>) {
    test_app_state_with_mailer(Arc::new(CapturingMailer::default()))
}

#[must_use]
pub fn test_app_state_with_mailer(mailer: Arc<CapturingMailer>) -> (AppState, Arc<CapturingMailer>) {
    let config = AuthConfig { jwt_secret: "test-secret".into(), ..AuthConfig::default() };
    (AppState::new(config, mailer.clone()), mailer)
}

/// Create a verified account and return its e-mail.
pub async fn seed_verified_user(state: &AppState, email: &str, password: &str) -> String {
    let user = state.users.sign_up("Test User", email, password).await.unwrap();
    state.users.mark_verified(&user.email).await.unwrap();
    user.email
}
