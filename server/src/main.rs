mod config;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::services::mailer::{LogMailer, OtpMailer, ResendMailer};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()))
        .init();

    let config = config::AuthConfig::from_env();
    let port = config.port;

    let mailer: Arc<dyn OtpMailer> = match &config.resend {
        Some(resend) => {
            tracing::info!(from = %resend.from, "otp mail via resend");
            Arc::new(ResendMailer::new(&resend.api_key, resend.from.clone(), config.otp.ttl.as_secs().div_ceil(60)))
        }
        None => {
            tracing::warn!("RESEND_API_KEY/RESEND_FROM not set; codes are only logged");
            Arc::new(LogMailer::new(config.echo_codes))
        }
    };

    let admin = config.admin.clone();
    let state = state::AppState::new(config, mailer);
    let otp = state.otps.settings();
    tracing::info!(
        ttl_secs = otp.ttl.as_secs(),
        cooldown_secs = otp.resend_cooldown.as_secs(),
        max_attempts = otp.max_attempts,
        "otp policy"
    );

    if let Some(seed) = admin {
        match state.users.seed_admin(&seed.email, &seed.password).await {
            Ok(user) => tracing::info!(email = %user.email, "admin account ready"),
            Err(e) => tracing::warn!(error = %e, "admin seed skipped"),
        }
    }

    // Expired codes and consumed reset ids would otherwise linger.
    let _sweeper = {
        let otps = state.otps.clone();
        let tokens = state.tokens.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let purged = otps.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "expired codes purged");
                }
                let forgotten = tokens.purge_consumed();
                if forgotten > 0 {
                    tracing::debug!(forgotten, "consumed reset tokens forgotten");
                }
            }
        })
    };

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos configuration unavailable; serving API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "storefront listening");
    axum::serve(listener, app).await.expect("server failed");
}
