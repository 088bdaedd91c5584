//! Admin dashboard: account listing with block controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `RequireRole` with the admin role. Blocking an account takes
//! effect on the server immediately; the blocked user's client notices on its
//! next session refresh or guarded navigation and is signed out.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::components::sign_out_button::SignOutButton;
use crate::net::types::UserSummary;
use crate::paths;

#[cfg(any(test, feature = "hydrate"))]
fn sorted_users(mut users: Vec<UserSummary>) -> Vec<UserSummary> {
    users.sort_by(|a, b| a.email.cmp(&b.email));
    users
}

fn block_action_label(user: &UserSummary) -> &'static str {
    if user.is_blocked { "Unblock" } else { "Block" }
}

fn status_label(user: &UserSummary) -> &'static str {
    match (user.is_blocked, user.is_verified) {
        (true, _) => "blocked",
        (false, true) => "active",
        (false, false) => "unverified",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct DashboardState {
    users: Vec<UserSummary>,
    loading: bool,
    error: Option<String>,
}

#[cfg(feature = "hydrate")]
fn load_users(state: RwSignal<DashboardState>) {
    state.try_update(|s| s.loading = true);
    leptos::task::spawn_local(async move {
        let result = crate::net::api::list_users().await;
        state.try_update(|s| {
            s.loading = false;
            match result {
                Ok(users) => {
                    s.users = sorted_users(users);
                    s.error = None;
                }
                Err(e) => s.error = Some(e.to_string()),
            }
        });
    });
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let state = RwSignal::new(DashboardState::default());

    #[cfg(feature = "hydrate")]
    load_users(state);

    let toggle_block = move |user: UserSummary| {
        let blocked = !user.is_blocked;
        leptos::logging::log!("setting blocked={blocked} for {}", user.email);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::set_user_blocked(&user.email, blocked).await {
                Ok(()) => load_users(state),
                Err(e) => {
                    state.try_update(|s| s.error = Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h1>"Admin dashboard"</h1>
                <a href=paths::HOME>"Storefront"</a>
                <SignOutButton/>
            </header>
            {move || state.with(|s| s.error.clone()).map(|e| view! { <p class="auth-message auth-message--error">{e}</p> })}
            <Show when=move || state.with(|s| s.loading)>
                <p class="admin-page__loading">"Loading accounts..."</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Email"</th>
                        <th>"Name"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.users.clone())
                        key=|user| (user.email.clone(), user.is_blocked)
                        children=move |user| {
                            let row = user.clone();
                            view! {
                                <tr>
                                    <td>{user.email.clone()}</td>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.role.to_string()}</td>
                                    <td>{status_label(&user)}</td>
                                    <td>
                                        <button class="btn" type="button" on:click=move |_| toggle_block(row.clone())>
                                            {block_action_label(&user)}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
