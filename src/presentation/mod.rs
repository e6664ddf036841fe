//! Presentation Layer
//!
//! HTTP routes, handlers and middleware of the admin surface.

pub mod http;
pub mod middleware;
