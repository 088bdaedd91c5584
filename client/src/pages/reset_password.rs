//! Final step of the password reset: choose a new password.
//!
//! The reset token from the verification page is held in memory only
//! (`ResetTokenSlot` context) and consumed by a successful submit. Opening the
//! page without one points the user back to the start of the reset.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;

use super::validation::validate_new_password;
use crate::paths;
use crate::util::auth::Navigator;

/// In-memory holder for the short-lived password reset token.
#[derive(Clone, Copy, Debug)]
pub struct ResetTokenSlot(pub RwSignal<Option<String>>);

impl ResetTokenSlot {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }
}

impl Default for ResetTokenSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// # Errors
///
/// Returns the message to show above the form.
fn validate_reset_input(token: Option<&str>, password: &str, confirm: &str) -> Result<String, &'static str> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Err("Your reset session has expired. Request a new code.");
    };
    validate_new_password(password, confirm)?;
    Ok(token.to_owned())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let slot = expect_context::<ResetTokenSlot>();
    let navigator = Navigator::from_router();
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token = match slot.0.with(|t| validate_reset_input(t.as_deref(), &password.get(), &confirm.get())) {
            Ok(token) => token,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let password_value = password.get();
        busy.set(true);
        info.set("Saving your new password...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::reset_password(&token, &password_value).await {
                Ok(()) => {
                    slot.0.set(None);
                    info.set(String::new());
                    navigator.go(paths::SIGN_IN);
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (navigator, token, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Choose a new password"</h1>
                <Show
                    when=move || slot.0.with(Option::is_some)
                    fallback=|| {
                        view! {
                            <p class="auth-message">
                                "Your reset session has expired. "
                                <a href=paths::FORGOT_PASSWORD>"Request a new code."</a>
                            </p>
                        }
                    }
                >
                    <form class="auth-form" on:submit=on_submit>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="New password"
                            autocomplete="new-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirm new password"
                            autocomplete="new-password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            "Reset password"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
