//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API (`/user`, `/admin`) and stitches it with
//! Leptos SSR rendering under a single Axum router. Compiled client assets
//! are served from the site root.

pub mod admin;
pub mod user;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/user/signup", post(user::signup))
        .route("/user/signin", post(user::signin))
        .route("/user/me", get(user::me))
        .route("/user/logout", post(user::logout))
        .route("/user/verify-otp", post(user::verify_otp))
        .route("/user/resend-otp", post(user::resend_otp))
        .route("/user/forgot-password", post(user::forgot_password))
        .route("/user/forgot-password/verify-otp", post(user::forgot_password_verify))
        .route("/user/reset-password", post(user::reset_password))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{email}/block", post(admin::block_user))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API routes + Leptos SSR pages + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(ServeDir::new(site_root_path)))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "harness_test.rs"]
pub(crate) mod harness;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
