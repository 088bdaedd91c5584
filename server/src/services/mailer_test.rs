use super::*;

#[test]
fn render_fills_every_placeholder() {
    let html = render_otp_email(VerificationPurpose::Signup, "ada@example.com", "123456", 10);
    assert!(html.contains("ada@example.com"));
    assert!(html.contains("123456"));
    assert!(html.contains("10 minutes"));
    assert!(html.contains("verify your account"));
    assert!(!html.contains("{{"));
}

#[test]
fn render_wording_follows_purpose() {
    let html = render_otp_email(VerificationPurpose::ForgotPassword, "ada@example.com", "654321", 15);
    assert!(html.contains("Reset your password"));
    assert!(!html.contains("verify your account"));
}

#[test]
fn render_escapes_email_markup() {
    let html = render_otp_email(VerificationPurpose::Signup, "a<b>\"'&{{CODE}}@example.com", "123456", 10);
    assert!(html.contains("a&lt;b&gt;&quot;&#x27;&amp;{{CODE}}@example.com"));
    assert!(!html.contains("<b>"));
}

#[test]
fn subjects_differ_by_purpose() {
    assert_ne!(subject(VerificationPurpose::Signup), subject(VerificationPurpose::ForgotPassword));
}

#[tokio::test]
async fn log_mailer_always_succeeds() {
    for echo in [true, false] {
        LogMailer::new(echo)
            .send_code("ada@example.com", VerificationPurpose::Signup, "123456")
            .await
            .unwrap();
    }
}
