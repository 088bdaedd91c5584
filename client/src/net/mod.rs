//! Networking modules for the auth and verification HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the REST calls and classifies failures; `types` defines the
//! JSON request and response bodies shared with the server.

pub mod api;
pub mod types;
