//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::require_role::RequireRole;
use crate::pages::{
    admin::AdminDashboardPage, forgot_password::ForgotPasswordPage, home::HomePage, not_found::NotFoundPage,
    reset_password::{ResetPasswordPage, ResetTokenSlot},
    sign_in::SignInPage, sign_up::SignUpPage, verify_otp::VerifyOtpPage,
};
use crate::paths;
use crate::state::auth::AuthState;
use crate::state::session::Role;
use crate::state::session_store::{SharedRepository, default_repository};
use crate::state::verification::OtpConfig;
use crate::util::auth::Navigator;
use crate::util::guard::home_route;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Where `/` sends the visitor once the session is restored.
fn start_route(state: &AuthState) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    match state.session {
        Some(session) if !session.is_blocked => Some(home_route(Some(&session))),
        _ => Some(paths::SIGN_IN),
    }
}

/// Root application component.
///
/// Provides the auth, repository, reset-token and OTP configuration contexts,
/// restores the stored session after mount, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let repo: SharedRepository = default_repository();
    provide_context(auth);
    provide_context(repo.clone());
    provide_context(ResetTokenSlot::new());
    provide_context(OtpConfig::default());

    // Effects only run in the browser, so SSR and the first hydrated render
    // both see `loading == true`.
    Effect::new(move || {
        auth.set(AuthState::restored(repo.load()));

        #[cfg(feature = "hydrate")]
        {
            let repo = repo.clone();
            let sent_epoch = auth.get_untracked().epoch;
            leptos::task::spawn_local(async move {
                let remote = crate::net::api::fetch_session().await;
                crate::util::auth::apply_refresh(auth, repo.as_ref(), sent_epoch, remote);
            });
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Storefront"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=StartRedirect/>
                <Route path=StaticSegment("sign-in") view=SignInPage/>
                <Route path=StaticSegment("sign-up") view=SignUpPage/>
                <Route path=StaticSegment("verify-otp") view=VerifyOtpPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route
                    path=StaticSegment("home")
                    view=|| view! { <RequireRole><HomePage/></RequireRole> }
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("dashboard"))
                    view=|| view! { <RequireRole roles=ADMIN_ONLY><AdminDashboardPage/></RequireRole> }
                />
            </Routes>
        </Router>
    }
}

#[component]
fn StartRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigator = Navigator::from_router();
    Effect::new(move || {
        if let Some(target) = start_route(&auth.get()) {
            navigator.go(target);
        }
    });

    view! { <p class="guard-pending">"Loading..."</p> }
}
