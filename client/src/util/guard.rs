//! Route authorization decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected navigation asks `authorize` whether the current session may
//! view the route. The decision is a plain value; applying it (rendering or
//! navigating) is left to `util::auth` and the `RequireRole` component.
//!
//! Denials are recovered locally by redirecting and are never shown to the
//! user as errors. A blocked account is treated as a forced logout: the
//! persisted session is destroyed before redirecting to sign-in.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::paths;
use crate::state::session::{Role, Session};
use crate::state::session_store::SessionRepository;

/// Outcome of a route authorization request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Why a route was denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDenial {
    /// No session present.
    Unauthenticated,
    /// Session marked blocked; treated as a forced logout.
    BlockedAccount,
    /// Session present but its role is not among the required roles.
    Forbidden,
}

impl AccessDenial {
    #[must_use]
    pub fn redirect_target(self) -> &'static str {
        match self {
            Self::Unauthenticated | Self::BlockedAccount => paths::SIGN_IN,
            Self::Forbidden => paths::HOME,
        }
    }
}

/// Pure access check. An empty `required` slice admits any authenticated role.
///
/// # Errors
///
/// Returns the reason the session may not view the route.
pub fn evaluate(required: &[Role], session: Option<&Session>) -> Result<(), AccessDenial> {
    let Some(session) = session else {
        return Err(AccessDenial::Unauthenticated);
    };
    if session.is_blocked {
        return Err(AccessDenial::BlockedAccount);
    }
    if !required.is_empty() && !required.contains(&session.role) {
        return Err(AccessDenial::Forbidden);
    }
    Ok(())
}

/// Decide a navigation and destroy the persisted session of a blocked account.
pub fn authorize<R>(required: &[Role], session: Option<&Session>, repo: &R) -> RouteDecision
where
    R: SessionRepository + ?Sized,
{
    match evaluate(required, session) {
        Ok(()) => RouteDecision::Allow,
        Err(denial) => {
            if denial == AccessDenial::BlockedAccount {
                leptos::logging::log!("blocked session observed; signing out");
                repo.clear();
            }
            RouteDecision::Redirect(denial.redirect_target())
        }
    }
}

/// Landing route for a session: admins go to the dashboard, everyone else
/// (including no session) to the default landing route.
#[must_use]
pub fn home_route(session: Option<&Session>) -> &'static str {
    match session {
        Some(session) if session.is_admin() => paths::ADMIN_DASHBOARD,
        _ => paths::HOME,
    }
}
