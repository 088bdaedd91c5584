//! Account creation page.
//!
//! The server answers with an unverified session and mails a sign-up code;
//! the page stores the session and moves on to verification.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;

use super::validation::{validate_email, validate_new_password};
use crate::paths;
use crate::state::auth::AuthState;
use crate::state::session_store::SharedRepository;
#[cfg(feature = "hydrate")]
use crate::state::verification::VerificationPurpose;
use crate::util::auth::Navigator;
#[cfg(feature = "hydrate")]
use crate::util::auth::establish_session;

#[derive(Clone, Debug, PartialEq, Eq)]
struct SignUpInput {
    name: String,
    email: String,
    password: String,
}

/// # Errors
///
/// Returns the message to show above the form.
fn validate_sign_up_input(name: &str, email: &str, password: &str, confirm: &str) -> Result<SignUpInput, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter your name.");
    }
    let email = validate_email(email)?;
    validate_new_password(password, confirm)?;
    Ok(SignUpInput { name: name.to_owned(), email, password: password.to_owned() })
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<SharedRepository>();
    let navigator = Navigator::from_router();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_sign_up_input(&name.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(input) => input,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let repo = repo.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::sign_up(&input.name, &input.email, &input.password).await {
                    Ok(session) => {
                        establish_session(auth, repo.as_ref(), session);
                        info.set(String::new());
                        navigator.go(&paths::verify_otp_href(&input.email, VerificationPurpose::Signup));
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, &repo, navigator, input);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create an account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Full name"
                        autocomplete="name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign up"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <div class="auth-links">
                    <a href=paths::SIGN_IN>"Already have an account? Sign in"</a>
                </div>
            </div>
        </div>
    }
}
