//! Route wrapper that renders its children only for permitted sessions.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::session::Role;
use crate::state::session_store::SharedRepository;
use crate::util::auth::install_route_guard;
use crate::util::guard::evaluate;

/// Gate a route. An empty `roles` slice admits any signed-in, unblocked user.
/// Denied visitors are redirected by the installed guard and never see the
/// children.
#[component]
pub fn RequireRole(#[prop(optional)] roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<SharedRepository>();
    install_route_guard(auth, repo, roles, use_navigate());

    let allowed = move || {
        let state = auth.get();
        !state.loading && evaluate(roles, state.session.as_ref()).is_ok()
    };

    view! {
        <Show when=allowed fallback=|| view! { <p class="guard-pending">"Checking your session..."</p> }>
            {children()}
        </Show>
    }
}
