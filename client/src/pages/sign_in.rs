//! Sign-in page for e-mail + password accounts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. A successful response stores the session descriptor and
//! lands on the role's home route; accounts that have not confirmed their
//! e-mail yet are sent to the verification page instead.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;

use super::validation::validate_email;
use crate::paths;
use crate::state::auth::AuthState;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::session::Session;
use crate::state::session_store::SharedRepository;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::verification::VerificationPurpose;
use crate::util::auth::Navigator;
#[cfg(feature = "hydrate")]
use crate::util::auth::establish_session;
use crate::util::guard::home_route;

/// # Errors
///
/// Returns the message to show above the form.
fn validate_sign_in_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok((email, password.to_owned()))
}

/// Where to go after the server accepted the credentials.
#[cfg(any(test, feature = "hydrate"))]
fn landing_after_sign_in(session: &Session, email: &str) -> String {
    if session.is_verified {
        home_route(Some(session)).to_owned()
    } else {
        paths::verify_otp_href(email, VerificationPurpose::Signup)
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<SharedRepository>();
    let navigator = Navigator::from_router();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: skip the form.
    Effect::new(move || {
        let state = auth.get();
        if let Some(session) = state.session.filter(|s| !s.is_blocked && s.is_verified) {
            navigator.go(home_route(Some(&session)));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let repo = repo.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::sign_in(&email_value, &password_value).await {
                    Ok(session) => {
                        establish_session(auth, repo.as_ref(), session);
                        info.set(String::new());
                        navigator.go(&landing_after_sign_in(&session, &email_value));
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&repo, email_value, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <div class="auth-links">
                    <a href=paths::FORGOT_PASSWORD>"Forgot password?"</a>
                    <a href=paths::SIGN_UP>"Create an account"</a>
                </div>
            </div>
        </div>
    }
}
