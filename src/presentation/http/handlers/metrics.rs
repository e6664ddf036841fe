//! Brand Performance Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::{LatestSnapshotResponse, SnapshotReport, SnapshotRequest};
use crate::application::services::{CollectingOutput, SnapshotOptions};
use crate::domain::MetricGroupCategory;
use crate::presentation::middleware::AdminUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// POST /admin/metrics/brand-performance/snapshots
///
/// Runs the same job as the console command and returns its output.
pub async fn run_snapshot(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<SnapshotRequest>,
) -> Result<Json<SnapshotReport>, AppError> {
    let output = Arc::new(CollectingOutput::new());
    let options = SnapshotOptions::new(SnapshotOptions::ids_from(request.ids.as_ref()))
        .with_output(output.clone());

    tracing::info!(admin = %admin.subject, ids = ?options.ids, "Snapshot requested from admin panel");

    let snapshot = state.performance_snapshot();
    let summary = snapshot.run(&options).await?;

    Ok(Json(SnapshotReport {
        exit_code: 0,
        brands_processed: summary.brands_processed,
        values_written: summary.values_written,
        lines: output.lines(),
    }))
}

/// GET /admin/brands/{brand_id}/metrics/brand-performance/latest
pub async fn latest_brand_performance(
    State(state): State<AppState>,
    Path(brand_id): Path<i64>,
) -> Result<Json<LatestSnapshotResponse>, AppError> {
    state
        .brands
        .find_by_id(brand_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Brand with id {} not found", brand_id)))?;

    let snapshot = state
        .metrics
        .latest_snapshot(brand_id, MetricGroupCategory::BrandPerformance)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No performance snapshot for brand {}", brand_id))
        })?;

    Ok(Json(LatestSnapshotResponse::from(snapshot)))
}
