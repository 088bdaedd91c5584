//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;

/// Authentication state tracking the current session and restore status.
///
/// Provided as `RwSignal<AuthState>` context. `loading` stays `true` until the
/// persisted session has been restored after mount. `epoch` advances on every
/// local sign-in or sign-out, so an async answer can tell whether the session
/// it was asked about is still the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
    pub epoch: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true, epoch: 0 }
    }
}

impl AuthState {
    /// State after restore has finished.
    #[must_use]
    pub fn restored(session: Option<Session>) -> Self {
        Self { session, loading: false, epoch: 0 }
    }

    /// Successor state holding `session`, one epoch later.
    #[must_use]
    pub fn replaced(self, session: Option<Session>) -> Self {
        Self { session, loading: false, epoch: self.epoch.wrapping_add(1) }
    }
}
