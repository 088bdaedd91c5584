//! Fallback for unknown routes.

use leptos::prelude::*;

use crate::paths;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Page not found"</h1>
                <div class="auth-links">
                    <a href=paths::ROOT>"Go to the start page"</a>
                </div>
            </div>
        </div>
    }
}
