//! One-time verification codes.
//!
//! Six-digit numeric codes keyed by `(email, purpose)`. Only a SHA-256 hash
//! of each code is kept. A code expires after its TTL, is burned after too
//! many wrong guesses, and is consumed by a successful check. Re-issuing is
//! refused while the resend cool-down of the previous code is running.
//!
//! TRADE-OFFS
//! ==========
//! Records live in a process-local `Mutex<HashMap>`, so a restart invalidates
//! every outstanding code. Clients recover through resend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use client::state::verification::VerificationPurpose;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::config::OtpSettings;

pub const CODE_LEN: usize = 6;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    #[error("invalid code")]
    InvalidCode,
    #[error("no active code")]
    Missing,
    #[error("code expired")]
    Expired,
    #[error("too many attempts")]
    TooManyAttempts,
    #[error("resend available in {retry_after_secs}s")]
    Cooldown { retry_after_secs: u64 },
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim();
    if normalized.len() != CODE_LEN || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(normalized.to_owned())
}

#[must_use]
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN).map(|_| char::from(b'0' + rng.random_range(0..10u8))).collect()
}

#[must_use]
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

struct OtpRecord {
    code_hash: String,
    issued_at: Instant,
    expires_at: Instant,
    failed_attempts: u32,
}

type OtpKey = (String, VerificationPurpose);

pub struct OtpStore {
    settings: OtpSettings,
    records: Mutex<HashMap<OtpKey, OtpRecord>>,
}

impl OtpStore {
    #[must_use]
    pub fn new(settings: OtpSettings) -> Self {
        Self { settings, records: Mutex::new(HashMap::new()) }
    }

    #[must_use]
    pub fn settings(&self) -> OtpSettings {
        self.settings
    }

    /// Issue a fresh code, replacing any previous one for the same key.
    ///
    /// # Errors
    ///
    /// `Cooldown` while the previous code's resend cool-down is running.
    pub fn issue(&self, email: &str, purpose: VerificationPurpose) -> Result<String, OtpError> {
        self.issue_at(email, purpose, Instant::now())
    }

    /// # Errors
    ///
    /// `Cooldown` while the previous code's resend cool-down is running.
    pub fn issue_at(&self, email: &str, purpose: VerificationPurpose, now: Instant) -> Result<String, OtpError> {
        let mut records = self.records.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let key = (email.to_owned(), purpose);
        if let Some(previous) = records.get(&key) {
            let elapsed = now.saturating_duration_since(previous.issued_at);
            if elapsed < self.settings.resend_cooldown {
                let remaining = self.settings.resend_cooldown - elapsed;
                return Err(OtpError::Cooldown { retry_after_secs: ceil_secs(remaining) });
            }
        }

        let code = generate_code();
        records.insert(
            key,
            OtpRecord {
                code_hash: hash_code(&code),
                issued_at: now,
                expires_at: now + self.settings.ttl,
                failed_attempts: 0,
            },
        );
        Ok(code)
    }

    /// Check and consume a code.
    ///
    /// # Errors
    ///
    /// `InvalidCode` for a malformed or wrong code, `Missing` when nothing is
    /// outstanding, `Expired` after the TTL, `TooManyAttempts` when this wrong
    /// guess used up the allowance.
    pub fn verify(&self, email: &str, purpose: VerificationPurpose, code: &str) -> Result<(), OtpError> {
        self.verify_at(email, purpose, code, Instant::now())
    }

    /// # Errors
    ///
    /// See [`OtpStore::verify`].
    pub fn verify_at(&self, email: &str, purpose: VerificationPurpose, code: &str, now: Instant) -> Result<(), OtpError> {
        let code = normalize_code(code).ok_or(OtpError::InvalidCode)?;
        let mut records = self.records.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let key = (email.to_owned(), purpose);
        let Some(record) = records.get_mut(&key) else {
            return Err(OtpError::Missing);
        };

        if now >= record.expires_at {
            records.remove(&key);
            return Err(OtpError::Expired);
        }
        if record.code_hash == hash_code(&code) {
            records.remove(&key);
            return Ok(());
        }

        record.failed_attempts += 1;
        if record.failed_attempts >= self.settings.max_attempts {
            records.remove(&key);
            return Err(OtpError::TooManyAttempts);
        }
        Err(OtpError::InvalidCode)
    }

    /// Forget the outstanding code, e.g. after its delivery failed, so the
    /// cool-down does not block an immediate retry.
    pub fn revoke(&self, email: &str, purpose: VerificationPurpose) {
        let mut records = self.records.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        records.remove(&(email.to_owned(), purpose));
    }

    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Drop expired records. Returns how many were removed.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut records = self.records.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = records.len();
        records.retain(|_, record| now < record.expires_at);
        before - records.len()
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

#[cfg(test)]
#[path = "otp_test.rs"]
mod tests;
