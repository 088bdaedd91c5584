//! Verification page for sign-up and password-reset codes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached as `/verify-otp?email=...&purpose=signup|forgot-password`. Mounts
//! one `VerificationFlow` for the address, drives its cool-down from a
//! `CountdownTask`, and wires `OtpInput` completions to the verify endpoint.
//!
//! LIFECYCLE
//! =========
//! On cleanup the countdown is cancelled and the flow unmounted, so a verify
//! or resend response that arrives after navigation is dropped.

#[cfg(test)]
#[path = "verify_otp_test.rs"]
mod verify_otp_test;

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::reset_password::ResetTokenSlot;
use super::validation::normalize_email;
use crate::components::otp_input::OtpInput;
#[cfg(any(test, feature = "hydrate"))]
use crate::net::api::VerifyOutcome;
use crate::paths;
use crate::state::auth::AuthState;
use crate::state::session_store::SharedRepository;
use crate::state::verification::{OtpConfig, Phase, VerificationFlow, VerificationPurpose};
use crate::util::auth::Navigator;
use crate::util::countdown::CountdownTask;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::guard::home_route;

/// Label of the resend control.
fn resend_label(remaining: u32) -> String {
    if remaining == 0 {
        "Resend code".to_owned()
    } else {
        format!("Resend code in {}:{:02}", remaining / 60, remaining % 60)
    }
}

fn heading(purpose: VerificationPurpose) -> &'static str {
    match purpose {
        VerificationPurpose::Signup => "Verify your email",
        VerificationPurpose::ForgotPassword => "Reset your password",
    }
}

/// Route to open once a code has been accepted.
#[cfg(any(test, feature = "hydrate"))]
fn route_after_verify(outcome: &VerifyOutcome) -> &'static str {
    match outcome {
        VerifyOutcome::Session(session) => home_route(Some(session)),
        VerifyOutcome::ResetToken(_) => paths::RESET_PASSWORD,
    }
}

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let query = use_query_map();
    let (email, purpose) = query.with_untracked(|q| {
        let email = q.get("email").map(|e| normalize_email(&e)).unwrap_or_default();
        (email, VerificationPurpose::from_query(q.get("purpose").as_deref()))
    });

    if email.is_empty() {
        return view! {
            <div class="auth-page">
                <div class="auth-card">
                    <h1>"Nothing to verify"</h1>
                    <p class="auth-message">"The verification link is missing an email address."</p>
                    <div class="auth-links">
                        <a href=paths::SIGN_IN>"Back to sign in"</a>
                    </div>
                </div>
            </div>
        }
        .into_any();
    }

    view! { <VerifyOtpForm email=email purpose=purpose/> }.into_any()
}

#[component]
fn VerifyOtpForm(email: String, purpose: VerificationPurpose) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<SharedRepository>();
    let reset_token = expect_context::<ResetTokenSlot>();
    let config = use_context::<OtpConfig>().unwrap_or_default();
    let navigator = Navigator::from_router();

    let flow = RwSignal::new(VerificationFlow::new(email, purpose, config));

    let countdown = CountdownTask::spawn(Duration::from_secs(1), move || {
        flow.try_update(VerificationFlow::tick);
    });
    on_cleanup(move || {
        countdown.cancel();
        flow.try_update(VerificationFlow::unmount);
    });

    let on_complete = Callback::new(move |code: String| {
        let Some(ticket) = flow.try_update(|f| f.begin_submit(&code)).flatten() else {
            return;
        };
        let identity = flow.with_untracked(|f| f.identity().to_owned());

        #[cfg(feature = "hydrate")]
        {
            let repo = repo.clone();
            leptos::task::spawn_local(async move {
                let response = crate::net::api::verify_otp(purpose, &identity, &ticket.code).await;
                let (result, outcome) = match response {
                    Ok(outcome) => (Ok(()), Some(outcome)),
                    Err(e) => (Err(crate::net::api::classify_verify_error(e)), None),
                };
                let applied = flow.try_update(|f| f.finish_submit(&ticket, result)).unwrap_or(false);
                let Some(outcome) = outcome.filter(|_| applied) else {
                    return;
                };
                match &outcome {
                    VerifyOutcome::Session(session) => {
                        crate::util::auth::establish_session(auth, repo.as_ref(), *session);
                    }
                    VerifyOutcome::ResetToken(token) => reset_token.0.set(Some(token.clone())),
                }
                navigator.go(route_after_verify(&outcome));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, &repo, reset_token, navigator, identity, ticket);
        }
    });

    let on_resend = move |_| {
        let Some(ticket) = flow.try_update(VerificationFlow::begin_resend).flatten() else {
            return;
        };
        let identity = flow.with_untracked(|f| f.identity().to_owned());
        leptos::logging::log!("requesting a new {} code", purpose.as_str());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::resend_otp(purpose, &identity)
                .await
                .map_err(crate::net::api::classify_resend_error);
            flow.try_update(|f| f.finish_resend(ticket, result));
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (identity, ticket);
        }
    };

    let reset_signal = Signal::derive(move || flow.with(VerificationFlow::reset_signal));
    let submitting = Signal::derive(move || flow.with(|f| f.phase() != Phase::Entering));
    let field_error = move || {
        flow.with(|f| f.error().filter(|e| e.is_field_level()).map(ToString::to_string))
    };
    let general_error = move || {
        flow.with(|f| f.error().filter(|e| !e.is_field_level()).map(ToString::to_string))
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{heading(purpose)}</h1>
                <p class="auth-card__subtitle">
                    "Enter the code we sent to "
                    <strong>{move || flow.with(|f| f.identity().to_owned())}</strong>
                </p>
                <OtpInput length=config.length on_complete=on_complete reset=reset_signal disabled=submitting/>
                {move || field_error().map(|message| view! { <p class="otp-input__error">{message}</p> })}
                <Show when=move || flow.with(VerificationFlow::is_submitting)>
                    <p class="auth-message">"Verifying..."</p>
                </Show>
                {move || {
                    general_error()
                        .map(|message| {
                            view! {
                                <p class="auth-message auth-message--error">
                                    {message}
                                    <button
                                        class="auth-message__dismiss"
                                        type="button"
                                        on:click=move |_| flow.update(VerificationFlow::dismiss_error)
                                    >
                                        "Dismiss"
                                    </button>
                                </p>
                            }
                        })
                }}
                <button
                    class="auth-button auth-button--secondary"
                    type="button"
                    disabled=move || !flow.with(VerificationFlow::can_resend)
                    on:click=on_resend
                >
                    {move || resend_label(flow.with(VerificationFlow::cooldown_remaining))}
                </button>
                <div class="auth-links">
                    <a href=paths::SIGN_IN>"Back to sign in"</a>
                </div>
            </div>
        </div>
    }
}
