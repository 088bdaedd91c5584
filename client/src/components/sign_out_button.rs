//! Sign-out control shared by the signed-in pages.

use leptos::prelude::*;

use crate::paths;
use crate::state::auth::AuthState;
use crate::state::session_store::SharedRepository;
use crate::util::auth::{Navigator, end_session};

/// Clears the server cookie, then the local session, then returns to sign-in.
/// The local session is cleared even when the logout request fails.
#[component]
pub fn SignOutButton() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<SharedRepository>();
    let navigator = Navigator::from_router();
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let repo = repo.clone();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::sign_out().await {
                leptos::logging::warn!("logout request failed: {e}");
            }
            end_session(auth, repo.as_ref());
            busy.set(false);
            navigator.go(paths::SIGN_IN);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            end_session(auth, repo.as_ref());
            busy.set(false);
            navigator.go(paths::SIGN_IN);
        }
    };

    view! {
        <button class="auth-button auth-button--secondary" type="button" disabled=move || busy.get() on:click=on_click>
            "Sign out"
        </button>
    }
}
