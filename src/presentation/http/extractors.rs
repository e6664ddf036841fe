//! Custom Extractors
//!
//! Axum extractors for content negotiation and the authenticated admin.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts, HeaderMap},
};

use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;

/// Whether the client wants JSON instead of redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFormat {
    pub expects_json: bool,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ajax = headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

        let wants_json = headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| {
                accept.split(',').any(|media| {
                    let media = media.split(';').next().unwrap_or("").trim();
                    media.contains("/json") || media.contains("+json")
                })
            });

        Self {
            expects_json: ajax || wants_json,
        }
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Missing admin session".into()))
    }
}
