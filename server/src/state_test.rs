use super::*;

#[test]
fn new_state_uses_config_policies() {
    let (state, _) = test_helpers::test_app_state();
    assert_eq!(state.otps.settings(), state.config.otp);
    assert_eq!(state.tokens.session_ttl(), state.config.session_ttl);
}

#[tokio::test]
async fn clones_share_the_same_stores() {
    let (state, _) = test_helpers::test_app_state();
    let clone = state.clone();
    test_helpers::seed_verified_user(&state, "ada@example.com", "correct horse").await;
    assert!(clone.users.find("ada@example.com").await.is_some());
}
