//! Metric snapshot entities and repository trait.
//!
//! Maps to the `campaign_metrics_groups` and `campaign_metrics_values` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AspectValues, MetricGroupCategory};
use crate::shared::error::AppError;

/// A snapshot container for one brand at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsGroup {
    pub id: i64,
    pub brand_id: i64,
    pub metric_group_category_id: i32,
    pub created_at: DateTime<Utc>,
}

/// One computed metric inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsValue {
    pub id: i64,
    pub campaign_metrics_group_id: i64,
    pub metric_aspect_id: i32,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

/// A group together with its values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub group: MetricsGroup,
    pub values: Vec<MetricsValue>,
}

/// Repository trait for metric snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Insert a new group, then one value row per aspect.
    async fn save_snapshot(
        &self,
        brand_id: i64,
        category: MetricGroupCategory,
        values: AspectValues,
    ) -> Result<MetricsSnapshot, AppError>;

    /// Newest group of a category for a brand.
    async fn latest_snapshot(
        &self,
        brand_id: i64,
        category: MetricGroupCategory,
    ) -> Result<Option<MetricsSnapshot>, AppError>;
}
