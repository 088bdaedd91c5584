//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, network calls,
//! navigation) and delegates decisions to `state` and `util`. Validation
//! helpers stay pure so they are tested natively.

pub mod admin;
pub mod forgot_password;
pub mod home;
pub mod not_found;
pub mod reset_password;
pub mod sign_in;
pub mod sign_up;
pub(crate) mod validation;
pub mod verify_otp;
