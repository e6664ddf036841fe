//! Creator Script Handlers
//!
//! Admin pages and form endpoints of a brand's creator scripts.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;

use crate::application::dto::{DestroyQuery, SetupPage};
use crate::application::services::CreatorScriptService;
use crate::presentation::http::extractors::ResponseFormat;
use crate::presentation::http::flash::{page_response, redirect_response};
use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// GET /admin/brands/{brand_id}/creator-scripts
pub async fn index(
    State(state): State<AppState>,
    Path(brand_id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let page = state.creator_script_service().index(brand_id).await?;
    Ok(page_response(jar, page))
}

/// GET /admin/brands/{brand_id}/creator-scripts/create
pub async fn create(
    State(state): State<AppState>,
    Path(brand_id): Path<i64>,
    format: ResponseFormat,
    jar: CookieJar,
) -> Result<Response, AppError> {
    setup(state, brand_id, None, format, jar).await
}

/// GET /admin/brands/{brand_id}/creator-scripts/{script_id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Path((brand_id, script_id)): Path<(i64, i64)>,
    format: ResponseFormat,
    jar: CookieJar,
) -> Result<Response, AppError> {
    setup(state, brand_id, Some(script_id), format, jar).await
}

/// POST /admin/brands/{brand_id}/creator-scripts
///
/// The body is taken as raw JSON; type mismatches come back as form errors.
pub async fn store(
    State(state): State<AppState>,
    Path(brand_id): Path<i64>,
    admin: AdminUser,
    format: ResponseFormat,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    tracing::debug!(brand_id, admin = %admin.subject, "Storing creator script");
    let redirect = state
        .creator_script_service()
        .upsert(brand_id, None, body)
        .await?;
    Ok(redirect_response(jar, format, redirect))
}

/// PATCH /admin/brands/{brand_id}/creator-scripts/{script_id}
pub async fn patch(
    State(state): State<AppState>,
    Path((brand_id, script_id)): Path<(i64, i64)>,
    admin: AdminUser,
    format: ResponseFormat,
    jar: CookieJar,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    tracing::debug!(brand_id, script_id, admin = %admin.subject, "Patching creator script");
    let redirect = state
        .creator_script_service()
        .upsert(brand_id, Some(script_id), body)
        .await?;
    Ok(redirect_response(jar, format, redirect))
}

/// DELETE /admin/brands/{brand_id}/creator-scripts/{script_id}
pub async fn destroy(
    State(state): State<AppState>,
    Path((brand_id, script_id)): Path<(i64, i64)>,
    Query(query): Query<DestroyQuery>,
    admin: AdminUser,
    format: ResponseFormat,
    jar: CookieJar,
) -> Result<Response, AppError> {
    tracing::debug!(brand_id, script_id, admin = %admin.subject, "Deleting creator script");
    let redirect = state
        .creator_script_service()
        .delete(brand_id, script_id, query.back_url().map(str::to_string))
        .await?;
    Ok(redirect_response(jar, format, redirect))
}

async fn setup(
    state: AppState,
    brand_id: i64,
    script_id: Option<i64>,
    format: ResponseFormat,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let page = state
        .creator_script_service()
        .setup(brand_id, script_id, format.expects_json)
        .await?;

    Ok(match page {
        SetupPage::Template { .. } => Json(page).into_response(),
        page => page_response(jar, page),
    })
}
