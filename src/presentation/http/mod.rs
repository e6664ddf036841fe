//! HTTP surface: routes, handlers, extractors and flash redirects.

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod routes;
