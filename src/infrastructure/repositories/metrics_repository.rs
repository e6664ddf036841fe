//! Metrics Repository Implementation
//!
//! PostgreSQL implementation of the MetricsRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    AspectValues, MetricGroupCategory, MetricsGroup, MetricsRepository, MetricsSnapshot,
    MetricsValue,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: i64,
    brand_id: i64,
    metric_group_category_id: i32,
    created_at: DateTime<Utc>,
}

impl From<GroupRow> for MetricsGroup {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.id,
            brand_id: row.brand_id,
            metric_group_category_id: row.metric_group_category_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ValueRow {
    id: i64,
    campaign_metrics_group_id: i64,
    metric_aspect_id: i32,
    value: f64,
    created_at: DateTime<Utc>,
}

impl From<ValueRow> for MetricsValue {
    fn from(row: ValueRow) -> Self {
        Self {
            id: row.id,
            campaign_metrics_group_id: row.campaign_metrics_group_id,
            metric_aspect_id: row.metric_aspect_id,
            value: row.value,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL metric snapshot repository.
#[derive(Clone)]
pub struct PgMetricsRepository {
    pool: PgPool,
}

impl PgMetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn save_snapshot(
        &self,
        brand_id: i64,
        category: MetricGroupCategory,
        values: AspectValues,
    ) -> Result<MetricsSnapshot, AppError> {
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO campaign_metrics_groups (brand_id, metric_group_category_id)
            VALUES ($1, $2)
            RETURNING id, brand_id, metric_group_category_id, created_at
            "#,
        )
        .bind(brand_id)
        .bind(category.id())
        .fetch_one(&mut *tx)
        .await?;

        let mut saved = Vec::with_capacity(values.len());
        for (aspect, value) in values {
            let row = sqlx::query_as::<_, ValueRow>(
                r#"
                INSERT INTO campaign_metrics_values (campaign_metrics_group_id, metric_aspect_id, value)
                VALUES ($1, $2, $3)
                RETURNING id, campaign_metrics_group_id, metric_aspect_id, value, created_at
                "#,
            )
            .bind(group.id)
            .bind(aspect.id())
            .bind(value)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(MetricsValue::from(row));
        }

        tx.commit().await?;

        Ok(MetricsSnapshot {
            group: group.into(),
            values: saved,
        })
    }

    async fn latest_snapshot(
        &self,
        brand_id: i64,
        category: MetricGroupCategory,
    ) -> Result<Option<MetricsSnapshot>, AppError> {
        let Some(group) = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, brand_id, metric_group_category_id, created_at
            FROM campaign_metrics_groups
            WHERE brand_id = $1 AND metric_group_category_id = $2
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(brand_id)
        .bind(category.id())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let values = sqlx::query_as::<_, ValueRow>(
            r#"
            SELECT id, campaign_metrics_group_id, metric_aspect_id, value, created_at
            FROM campaign_metrics_values
            WHERE campaign_metrics_group_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(group.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(MetricsSnapshot {
            group: group.into(),
            values: values.into_iter().map(MetricsValue::from).collect(),
        }))
    }
}
