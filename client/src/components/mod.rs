//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the code-entry widget, route gating and the sign-out
//! control while reading shared auth state from Leptos context providers.

pub mod otp_input;
pub mod require_role;
pub mod sign_out_button;
