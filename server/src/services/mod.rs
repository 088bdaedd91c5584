//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own account, code and token state so route handlers can
//! stay focused on protocol translation and cookie plumbing.

pub mod mailer;
pub mod otp;
pub mod token;
pub mod users;
