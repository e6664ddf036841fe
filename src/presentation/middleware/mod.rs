//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{admin_auth_middleware, authorize_admin, AdminClaims, AdminUser};
pub use logging::track_metrics;
