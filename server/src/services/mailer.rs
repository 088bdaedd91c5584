//! One-time-code delivery.
//!
//! Production sends through Resend; local runs fall back to [`LogMailer`],
//! which writes the code to the trace log when `echo_codes` is enabled.

use async_trait::async_trait;
use client::state::verification::VerificationPurpose;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

const OTP_EMAIL_TEMPLATE: &str = include_str!("../../templates/otp_email.html");

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait OtpMailer: Send + Sync {
    async fn send_code(&self, to: &str, purpose: VerificationPurpose, code: &str) -> Result<(), MailError>;
}

#[must_use]
pub fn subject(purpose: VerificationPurpose) -> &'static str {
    match purpose {
        VerificationPurpose::Signup => "Verify your Storefront account",
        VerificationPurpose::ForgotPassword => "Your Storefront password reset code",
    }
}

#[must_use]
pub fn render_otp_email(purpose: VerificationPurpose, email: &str, code: &str, ttl_minutes: u64) -> String {
    let (heading, action) = match purpose {
        VerificationPurpose::Signup => ("Confirm your email", "verify your account"),
        VerificationPurpose::ForgotPassword => ("Reset your password", "reset your password"),
    };
    OTP_EMAIL_TEMPLATE
        .replace("{{HEADING}}", heading)
        .replace("{{ACTION}}", action)
        .replace("{{CODE}}", code)
        .replace("{{MINUTES}}", &ttl_minutes.to_string())
        .replace("{{EMAIL}}", &escape_html(email))
}

/// Escape text for an HTML element or quoted attribute.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// RESEND
// =============================================================================

pub struct ResendMailer {
    resend: Resend,
    from: String,
    ttl_minutes: u64,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: impl Into<String>, ttl_minutes: u64) -> Self {
        Self { resend: Resend::new(api_key), from: from.into(), ttl_minutes }
    }
}

#[async_trait]
impl OtpMailer for ResendMailer {
    async fn send_code(&self, to: &str, purpose: VerificationPurpose, code: &str) -> Result<(), MailError> {
        let html = render_otp_email(purpose, to, code, self.ttl_minutes);
        let email = CreateEmailBaseOptions::new(&self.from, [to], subject(purpose)).with_html(&html);
        self.resend
            .emails
            .send(email)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// LOG
// =============================================================================

pub struct LogMailer {
    echo_codes: bool,
}

impl LogMailer {
    #[must_use]
    pub fn new(echo_codes: bool) -> Self {
        Self { echo_codes }
    }
}

#[async_trait]
impl OtpMailer for LogMailer {
    async fn send_code(&self, to: &str, purpose: VerificationPurpose, code: &str) -> Result<(), MailError> {
        if self.echo_codes {
            tracing::info!(%to, purpose = purpose.as_str(), %code, "otp issued (not emailed)");
        } else {
            tracing::info!(%to, purpose = purpose.as_str(), "otp issued; no mail transport configured");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;
