//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod creator_script;
pub mod health;
pub mod metrics;
