//! Client-side state containers.
//!
//! DESIGN
//! ======
//! Plain data types with pure transitions. Pages wrap them in `RwSignal`s and
//! provide them through Leptos context; none of these modules touch the DOM.

pub mod auth;
pub mod otp;
pub mod session;
pub mod session_store;
pub mod verification;
