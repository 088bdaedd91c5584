//! Default landing page for signed-in shoppers.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::sign_out_button::SignOutButton;
use crate::paths;
use crate::state::auth::AuthState;
use crate::state::session::{Provider, Session};

fn account_summary(session: &Session) -> String {
    let provider = match session.provider {
        Provider::Local => "email and password",
        Provider::Google => "Google",
    };
    let status = if session.is_verified { "verified" } else { "not verified yet" };
    format!("Signed in as {} with {provider}; email {status}.", session.role)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = move || auth.with(|a| a.session);

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>"Storefront"</h1>
                <SignOutButton/>
            </header>
            <p class="home-page__summary">{move || session().map(|s| account_summary(&s)).unwrap_or_default()}</p>
            <Show when=move || session().is_some_and(|s| s.is_admin())>
                <a class="auth-button" href=paths::ADMIN_DASHBOARD>"Open admin dashboard"</a>
            </Show>
        </div>
    }
}
