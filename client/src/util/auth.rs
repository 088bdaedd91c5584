//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical guard behavior through
//! `install_route_guard`; sign-in, verification and sign-out pages keep the
//! `AuthState` signal and the session repository in step through
//! `establish_session` and `end_session`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::guard::{RouteDecision, authorize};
use crate::net::api::ApiError;
use crate::state::auth::AuthState;
use crate::state::session::{Role, Session};
use crate::state::session_store::{SessionRepository, SharedRepository};

/// Router navigation that can be captured by `Send` callbacks and async
/// response handlers. Does nothing once the owning page is gone.
#[derive(Clone, Copy)]
pub struct Navigator(StoredValue<Rc<dyn Fn(&str, NavigateOptions)>, LocalStorage>);

impl Navigator {
    /// Capture the router's navigate function. Must run inside a `<Router>`.
    #[must_use]
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        let navigate: Rc<dyn Fn(&str, NavigateOptions)> = Rc::new(move |path: &str, options| navigate(path, options));
        Self(StoredValue::new_local(navigate))
    }

    pub fn go(self, path: &str) {
        if let Some(navigate) = self.0.try_with_value(Rc::clone) {
            navigate(path, NavigateOptions::default());
        }
    }
}

/// Re-run the guard whenever auth changes and navigate away from a denied
/// route. Nothing happens while the stored session is still being restored.
pub fn install_route_guard<F>(
    auth: RwSignal<AuthState>,
    repo: SharedRepository,
    required: &'static [Role],
    navigate: F,
) where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        enforce_route(auth, state, repo.as_ref(), required, &navigate);
    });
}

/// One guard pass over `state`.
///
/// A blocked session is dropped from the signal (the repository is cleared
/// by `authorize`); the next pass then sees no session and redirects to
/// sign-in. Any other denial navigates straight away.
pub fn enforce_route<F>(
    auth: RwSignal<AuthState>,
    state: AuthState,
    repo: &dyn SessionRepository,
    required: &[Role],
    navigate: &F,
) where
    F: Fn(&str, NavigateOptions),
{
    if state.loading {
        return;
    }
    match authorize(required, state.session.as_ref(), repo) {
        RouteDecision::Allow => {}
        RouteDecision::Redirect(_) if state.session.is_some_and(|s| s.is_blocked) => {
            auth.update(|current| *current = current.replaced(None));
        }
        RouteDecision::Redirect(target) => navigate(target, NavigateOptions::default()),
    }
}

/// Record a session returned by a successful authentication response.
pub fn establish_session(auth: RwSignal<AuthState>, repo: &dyn SessionRepository, session: Session) {
    repo.save(&session);
    auth.update(|current| *current = current.replaced(Some(session)));
}

/// Forget the current session locally.
pub fn end_session(auth: RwSignal<AuthState>, repo: &dyn SessionRepository) {
    repo.clear();
    auth.update(|current| *current = current.replaced(None));
}

/// Merge the answer of `GET /user/me` into the locally restored session.
///
/// A fresh descriptor always wins. `401` means the cookie is gone, so the
/// session ends. `403` means the account was blocked; the session is kept but
/// marked blocked so the next guard run performs the forced logout. Any other
/// failure keeps the local session.
#[must_use]
pub fn reconcile_refresh(local: Option<Session>, remote: Result<Session, ApiError>) -> Option<Session> {
    match remote {
        Ok(session) => Some(session),
        Err(err) => match err.status() {
            Some(401) => None,
            Some(403) => local.map(|s| Session { is_blocked: true, ..s }),
            _ => local,
        },
    }
}

/// Apply `reconcile_refresh` to the signal and the repository.
///
/// `sent_epoch` is the auth epoch observed when the request was sent. If the
/// user signed in or out while it was in flight, the answer describes a
/// session that no longer exists and is dropped.
pub fn apply_refresh(
    auth: RwSignal<AuthState>,
    repo: &dyn SessionRepository,
    sent_epoch: u64,
    remote: Result<Session, ApiError>,
) {
    let current = auth.get_untracked();
    if current.epoch != sent_epoch {
        leptos::logging::log!("session changed during refresh; ignoring stale answer");
        return;
    }
    let next = reconcile_refresh(current.session, remote);
    if next == current.session {
        return;
    }
    match next {
        Some(session) => establish_session(auth, repo, session),
        None => end_session(auth, repo),
    }
}
