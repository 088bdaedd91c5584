use super::*;
use crate::state::session::{Provider, Session};

fn session(role: Role, is_blocked: bool) -> Session {
    Session { role, is_verified: true, is_blocked, provider: Provider::Local }
}

#[test]
fn start_route_waits_for_restore() {
    assert_eq!(start_route(&AuthState::default()), None);
}

#[test]
fn start_route_sends_visitors_to_sign_in() {
    assert_eq!(start_route(&AuthState::restored(None)), Some("/sign-in"));
    assert_eq!(start_route(&AuthState::restored(Some(session(Role::User, true)))), Some("/sign-in"));
}

#[test]
fn start_route_uses_role_home() {
    assert_eq!(start_route(&AuthState::restored(Some(session(Role::User, false)))), Some("/home"));
    assert_eq!(start_route(&AuthState::restored(Some(session(Role::Admin, false)))), Some("/admin/dashboard"));
}
