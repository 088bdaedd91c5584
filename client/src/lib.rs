//! # storefront-client
//!
//! Leptos + WASM frontend for the storefront's account flows: sign-in,
//! sign-up, e-mail verification codes, password reset, and role-gated routes.
//!
//! The decision logic (session parsing, route authorization, code entry, the
//! verification state machine and its cool-down) lives in `state` and `util`
//! and is plain Rust; `components` and `pages` bind it to the DOM.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod paths;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
