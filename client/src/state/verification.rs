//! OTP verification flow for one mounted verification page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns one `VerificationFlow` in a signal. The `OtpInput` component
//! emits completed codes; the page turns them into submit tickets, performs
//! the network call, and hands the result back. A one-second `CountdownTask`
//! calls `tick`.
//!
//! DESIGN
//! ======
//! Network work is split into `begin_*` (synchronous, guards against duplicate
//! in-flight requests) and `finish_*` (applies the response). Tickets carry the
//! flow generation, so a response that arrives after `unmount` is dropped.
//! No request is ever retried automatically.

#[cfg(test)]
#[path = "verification_test.rs"]
mod verification_test;

use serde::{Deserialize, Serialize};

use super::otp::{DEFAULT_OTP_LENGTH, is_complete_code};
use crate::util::countdown::{Cooldown, RESEND_COOLDOWN_SECS};

/// What the code proves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationPurpose {
    /// Confirms the e-mail address of a new account.
    #[default]
    Signup,
    /// Authorizes a password reset.
    ForgotPassword,
}

impl VerificationPurpose {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::ForgotPassword => "forgot-password",
        }
    }

    /// Purpose named by a `purpose` query value; anything unknown is sign-up.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("forgot-password") => Self::ForgotPassword,
            _ => Self::Signup,
        }
    }
}

/// User-visible verification failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// The verifier rejected the submitted code; shown next to the input.
    #[error("{0}")]
    Rejected(String),
    /// Requesting a new code failed; shown as a general message.
    #[error("{0}")]
    ResendFailed(String),
    /// Any other request failure; shown as a general message.
    #[error("{0}")]
    Network(String),
}

impl VerificationError {
    #[must_use]
    pub fn is_field_level(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Submission state of the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Submitting,
    /// Terminal: further input is irrelevant.
    Verified,
}

/// Permission to run one verify call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    pub code: String,
}

/// Permission to run one resend call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResendTicket {
    generation: u64,
}

/// Configuration of the entry widget and the resend cool-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpConfig {
    pub length: usize,
    pub resend_cooldown_secs: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { length: DEFAULT_OTP_LENGTH, resend_cooldown_secs: RESEND_COOLDOWN_SECS }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationFlow {
    identity: String,
    purpose: VerificationPurpose,
    config: OtpConfig,
    cooldown: Cooldown,
    phase: Phase,
    error: Option<VerificationError>,
    resend_in_flight: bool,
    /// Flipped whenever the entry slots must be cleared; fed to `OtpInput`.
    reset_signal: bool,
    generation: u64,
    mounted: bool,
}

impl VerificationFlow {
    /// Mount a flow for `identity` (the e-mail address being verified). The
    /// cool-down starts immediately.
    #[must_use]
    pub fn new(identity: impl Into<String>, purpose: VerificationPurpose, config: OtpConfig) -> Self {
        Self {
            identity: identity.into(),
            purpose,
            config,
            cooldown: Cooldown::new(config.resend_cooldown_secs),
            phase: Phase::Entering,
            error: None,
            resend_in_flight: false,
            reset_signal: false,
            generation: 0,
            mounted: true,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn purpose(&self) -> VerificationPurpose {
        self.purpose
    }

    #[must_use]
    pub fn config(&self) -> OtpConfig {
        self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn error(&self) -> Option<&VerificationError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    /// True exactly when the cool-down has reached zero.
    #[must_use]
    pub fn resend_enabled(&self) -> bool {
        self.cooldown.is_expired()
    }

    #[must_use]
    pub fn reset_signal(&self) -> bool {
        self.reset_signal
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    #[cfg(test)]
    pub fn is_resending(&self) -> bool {
        self.resend_in_flight
    }

    /// Whether the resend control should be active.
    #[must_use]
    pub fn can_resend(&self) -> bool {
        self.mounted && self.phase == Phase::Entering && self.resend_enabled() && !self.resend_in_flight
    }

    /// One cool-down second elapsed.
    pub fn tick(&mut self) {
        if self.mounted {
            self.cooldown.tick();
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Start verifying `code`. Returns `None` while another submission is in
    /// flight, after success, after unmount, or for an incomplete code.
    pub fn begin_submit(&mut self, code: &str) -> Option<SubmitTicket> {
        if !self.mounted || self.phase != Phase::Entering || !is_complete_code(code, self.config.length) {
            return None;
        }
        self.phase = Phase::Submitting;
        self.error = None;
        Some(SubmitTicket { generation: self.generation, code: code.to_owned() })
    }

    /// Apply a verify response. Returns `false` when the response was stale.
    pub fn finish_submit(&mut self, ticket: &SubmitTicket, result: Result<(), VerificationError>) -> bool {
        if !self.is_current(ticket.generation) || self.phase != Phase::Submitting {
            return false;
        }
        match result {
            Ok(()) => {
                self.phase = Phase::Verified;
                self.error = None;
            }
            Err(e) => {
                self.phase = Phase::Entering;
                self.error = Some(e);
            }
        }
        true
    }

    /// Request a new code: clears the entry, restarts the cool-down, and marks
    /// the resend as in flight. Returns `None` unless `can_resend()`.
    pub fn begin_resend(&mut self) -> Option<ResendTicket> {
        if !self.can_resend() {
            return None;
        }
        self.reset_signal = !self.reset_signal;
        self.cooldown.restart();
        self.resend_in_flight = true;
        self.error = None;
        Some(ResendTicket { generation: self.generation })
    }

    /// Apply a resend response. The cool-down is left exactly as it is.
    pub fn finish_resend(&mut self, ticket: ResendTicket, result: Result<(), VerificationError>) -> bool {
        if !self.is_current(ticket.generation) {
            return false;
        }
        self.resend_in_flight = false;
        if let Err(e) = result {
            self.error = Some(e);
        }
        true
    }

    /// Tear down: later ticks and responses are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        self.resend_in_flight = false;
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn is_current(&self, generation: u64) -> bool {
        self.mounted && generation == self.generation
    }
}
