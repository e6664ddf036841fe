//! Flash state and redirect responses.
//!
//! Browsers get a `303 See Other` with the flash state in a short lived
//! cookie, consumed by the next page. Clients that expect JSON get the
//! redirect target and flash state in the body instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;
use serde_json::Value;

use crate::application::dto::{Flash, FormRedirect, Page, RedirectResponse};
use crate::presentation::http::extractors::ResponseFormat;

pub const FLASH_COOKIE: &str = "brand_admin_flash";

/// Browsers drop cookies over 4096 bytes. The rest is left for the name
/// and attributes.
pub const MAX_FLASH_VALUE_BYTES: usize = 3900;

/// Old input strings longer than this are not carried across a redirect.
const MAX_OLD_INPUT_STRING: usize = 255;

pub fn encode_flash(flash: &Flash) -> Option<String> {
    serde_json::to_vec(flash).ok().map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
}

pub fn decode_flash(value: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Encode `flash` into at most [`MAX_FLASH_VALUE_BYTES`].
///
/// Long old input strings go first, then the whole old input, then
/// trailing errors. Notifications are always kept.
pub fn encode_flash_within_budget(flash: &Flash) -> Option<String> {
    let fits = |flash: &Flash| encode_flash(flash).filter(|v| v.len() <= MAX_FLASH_VALUE_BYTES);

    if let Some(value) = fits(flash) {
        return Some(value);
    }

    let mut trimmed = flash.clone();
    if let Some(old_input) = trimmed.old_input.as_mut() {
        drop_long_strings(old_input);
        if let Some(value) = fits(&trimmed) {
            tracing::debug!("Dropped long old input values from flash cookie");
            return Some(value);
        }
    }

    trimmed.old_input = None;
    while !trimmed.errors.is_empty() {
        if let Some(value) = fits(&trimmed) {
            tracing::warn!("Flash cookie trimmed to fit the size limit");
            return Some(value);
        }
        trimmed.errors.pop();
    }

    fits(&trimmed)
}

fn drop_long_strings(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            fields.retain(|_, v| !matches!(v, Value::String(s) if s.len() > MAX_OLD_INPUT_STRING));
            fields.values_mut().for_each(drop_long_strings);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_long_strings),
        _ => {}
    }
}

/// Read and clear the pending flash state.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Flash) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Flash::default());
    };

    let flash = decode_flash(cookie.value()).unwrap_or_else(|| {
        tracing::debug!("Discarding unreadable flash cookie");
        Flash::default()
    });

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

/// Turn a form outcome into a redirect or its JSON equivalent.
pub fn redirect_response(jar: CookieJar, format: ResponseFormat, redirect: FormRedirect) -> Response {
    if format.expects_json {
        let status = if redirect.succeeded {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        return (status, Json(RedirectResponse::from(redirect))).into_response();
    }

    let jar = match encode_flash_within_budget(&redirect.flash) {
        Some(value) if !redirect.flash.is_empty() => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        _ => jar,
    };

    (jar, Redirect::to(&redirect.to)).into_response()
}

/// Serialize a page view model with the flash state meant for it.
pub fn page_response<T: Serialize>(jar: CookieJar, body: T) -> Response {
    let (jar, flash) = take_flash(jar);
    (jar, Json(Page::new(body, flash))).into_response()
}
