//! CORS Middleware Configuration

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Create CORS layer from settings
///
/// The admin forms need PATCH and DELETE, and send `X-Requested-With`
/// from scripted clients.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<_> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            X_REQUESTED_WITH,
        ]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(origins)
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
