//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser and timing concerns from page and component
//! logic so the decisions stay testable natively.

pub mod auth;
pub mod countdown;
pub mod guard;
pub mod persistence;
