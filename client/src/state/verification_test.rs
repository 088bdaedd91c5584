use super::*;

fn flow() -> VerificationFlow {
    VerificationFlow::new("shopper@example.com", VerificationPurpose::Signup, OtpConfig::default())
}

fn expire_cooldown(flow: &mut VerificationFlow) {
    for _ in 0..flow.config().resend_cooldown_secs {
        flow.tick();
    }
}

// =============================================================================
// mount / cooldown
// =============================================================================

#[test]
fn new_flow_is_entering_with_running_cooldown() {
    let flow = flow();
    assert_eq!(flow.identity(), "shopper@example.com");
    assert_eq!(flow.phase(), Phase::Entering);
    assert_eq!(flow.cooldown_remaining(), 30);
    assert!(!flow.resend_enabled());
    assert!(!flow.can_resend());
}

#[test]
fn resend_enabled_tracks_cooldown_reaching_zero() {
    let mut flow = flow();
    for _ in 0..29 {
        flow.tick();
        assert_eq!(flow.resend_enabled(), flow.cooldown_remaining() == 0);
    }
    flow.tick();
    assert!(flow.resend_enabled());
    flow.tick();
    assert!(flow.resend_enabled(), "stays enabled until resend is triggered");
}

#[test]
fn resend_resets_cooldown_and_toggles_reset_signal() {
    let mut flow = flow();
    expire_cooldown(&mut flow);
    let before = flow.reset_signal();
    let ticket = flow.begin_resend();
    assert!(ticket.is_some());
    assert_eq!(flow.cooldown_remaining(), 30);
    assert!(!flow.resend_enabled());
    assert_ne!(flow.reset_signal(), before);
    assert!(flow.is_resending());
}

#[test]
fn resend_is_refused_while_cooling_down() {
    let mut flow = flow();
    flow.tick();
    assert_eq!(flow.begin_resend(), None);
    assert_eq!(flow.cooldown_remaining(), 29);
}

#[test]
fn failed_resend_surfaces_error_and_keeps_timer() {
    let mut flow = flow();
    expire_cooldown(&mut flow);
    let ticket = flow.begin_resend().unwrap();
    flow.tick();
    flow.tick();
    let applied = flow.finish_resend(ticket, Err(VerificationError::ResendFailed("try later".into())));
    assert!(applied);
    assert_eq!(flow.cooldown_remaining(), 28);
    assert!(!flow.is_resending());
    assert_eq!(flow.error(), Some(&VerificationError::ResendFailed("try later".into())));
    assert!(!flow.error().unwrap().is_field_level());
}

#[test]
fn successful_resend_clears_in_flight_flag() {
    let mut flow = flow();
    expire_cooldown(&mut flow);
    let ticket = flow.begin_resend().unwrap();
    assert!(flow.finish_resend(ticket, Ok(())));
    assert!(!flow.is_resending());
    assert_eq!(flow.error(), None);
}

// =============================================================================
// submit
// =============================================================================

#[test]
fn submit_success_reaches_verified() {
    let mut flow = flow();
    let ticket = flow.begin_submit("123456").unwrap();
    assert_eq!(ticket.code, "123456");
    assert!(flow.is_submitting());
    assert!(flow.finish_submit(&ticket, Ok(())));
    assert_eq!(flow.phase(), Phase::Verified);
    assert_eq!(flow.begin_submit("123456"), None);
}

#[test]
fn submit_rejection_returns_to_entering_with_field_error() {
    let mut flow = flow();
    let ticket = flow.begin_submit("000000").unwrap();
    flow.finish_submit(&ticket, Err(VerificationError::Rejected("Invalid code".into())));
    assert_eq!(flow.phase(), Phase::Entering);
    assert!(flow.error().is_some_and(VerificationError::is_field_level));
}

#[test]
fn duplicate_submission_is_refused_while_in_flight() {
    let mut flow = flow();
    assert!(flow.begin_submit("123456").is_some());
    assert_eq!(flow.begin_submit("123456"), None);
}

#[test]
fn incomplete_code_is_not_submitted() {
    let mut flow = flow();
    assert_eq!(flow.begin_submit("123"), None);
    assert_eq!(flow.begin_submit("12345x"), None);
    assert_eq!(flow.phase(), Phase::Entering);
}

#[test]
fn resubmit_after_rejection_clears_previous_error() {
    let mut flow = flow();
    let first = flow.begin_submit("111111").unwrap();
    flow.finish_submit(&first, Err(VerificationError::Rejected("Invalid code".into())));
    let second = flow.begin_submit("222222").unwrap();
    assert_eq!(flow.error(), None);
    assert!(flow.finish_submit(&second, Ok(())));
}

#[test]
fn resend_is_refused_during_submission_and_after_success() {
    let mut flow = flow();
    expire_cooldown(&mut flow);
    let ticket = flow.begin_submit("123456").unwrap();
    assert!(!flow.can_resend());
    flow.finish_submit(&ticket, Ok(()));
    assert_eq!(flow.begin_resend(), None);
}

// =============================================================================
// unmount
// =============================================================================

#[test]
fn late_verify_response_after_unmount_is_dropped() {
    let mut flow = flow();
    let ticket = flow.begin_submit("123456").unwrap();
    flow.unmount();
    assert!(!flow.finish_submit(&ticket, Ok(())));
    assert_ne!(flow.phase(), Phase::Verified);
}

#[test]
fn late_resend_response_after_unmount_is_dropped() {
    let mut flow = flow();
    expire_cooldown(&mut flow);
    let ticket = flow.begin_resend().unwrap();
    flow.unmount();
    assert!(!flow.finish_resend(ticket, Err(VerificationError::ResendFailed("x".into()))));
    assert_eq!(flow.error(), None);
}

#[test]
fn ticks_after_unmount_do_nothing() {
    let mut flow = flow();
    flow.unmount();
    flow.tick();
    assert_eq!(flow.cooldown_remaining(), 30);
    assert!(!flow.is_mounted());
}

// =============================================================================
// purpose
// =============================================================================

#[test]
fn purpose_from_query_defaults_to_signup() {
    assert_eq!(VerificationPurpose::from_query(None), VerificationPurpose::Signup);
    assert_eq!(VerificationPurpose::from_query(Some("bogus")), VerificationPurpose::Signup);
    assert_eq!(
        VerificationPurpose::from_query(Some("forgot-password")),
        VerificationPurpose::ForgotPassword
    );
}

#[test]
fn purpose_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&VerificationPurpose::ForgotPassword).unwrap(),
        "\"forgot-password\""
    );
    assert_eq!(VerificationPurpose::ForgotPassword.as_str(), "forgot-password");
}

#[test]
fn custom_config_controls_length_and_cooldown() {
    let config = OtpConfig { length: 4, resend_cooldown_secs: 2 };
    let mut flow = VerificationFlow::new("a@b.com", VerificationPurpose::Signup, config);
    assert!(flow.begin_submit("123456").is_none());
    flow.tick();
    flow.tick();
    assert!(flow.can_resend());
    assert!(flow.begin_submit("1234").is_some());
}
