//! Brand Performance Source Implementation
//!
//! Aggregates brand activity tables for the performance calculators.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{BrandPerformanceSource, EngagementTotals, OrderTotals, ShippingProvider};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct OrderTotalsRow {
    orders: i64,
    items: i64,
    gmv: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct EngagementRow {
    views: i64,
    likes: i64,
    comments: i64,
    shares: i64,
}

/// PostgreSQL reader over `creator_contents`, `brand_orders`,
/// `brand_creators` and `product_shipments`.
#[derive(Clone)]
pub struct PgBrandPerformanceSource {
    pool: PgPool,
}

impl PgBrandPerformanceSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandPerformanceSource for PgBrandPerformanceSource {
    async fn content_gmv(&self, brand_id: i64) -> Result<Vec<f64>, AppError> {
        let values = sqlx::query_scalar::<_, f64>(
            "SELECT gmv::FLOAT8 FROM creator_contents WHERE brand_id = $1",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    async fn order_totals(&self, brand_id: i64) -> Result<OrderTotals, AppError> {
        let row = sqlx::query_as::<_, OrderTotalsRow>(
            r#"
            SELECT COUNT(*) AS orders,
                   COALESCE(SUM(items_count), 0)::BIGINT AS items,
                   COALESCE(SUM(total_amount), 0)::FLOAT8 AS gmv
            FROM brand_orders
            WHERE brand_id = $1
            "#,
        )
        .bind(brand_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderTotals {
            orders: row.orders,
            items: row.items,
            gmv: row.gmv,
        })
    }

    async fn engagement_totals(&self, brand_id: i64) -> Result<EngagementTotals, AppError> {
        let row = sqlx::query_as::<_, EngagementRow>(
            r#"
            SELECT COALESCE(SUM(views), 0)::BIGINT AS views,
                   COALESCE(SUM(likes), 0)::BIGINT AS likes,
                   COALESCE(SUM(comments), 0)::BIGINT AS comments,
                   COALESCE(SUM(shares), 0)::BIGINT AS shares
            FROM creator_contents
            WHERE brand_id = $1
            "#,
        )
        .bind(brand_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(EngagementTotals {
            views: row.views,
            likes: row.likes,
            comments: row.comments,
            shares: row.shares,
        })
    }

    async fn creator_status_counts(&self, brand_id: i64) -> Result<Vec<(i32, i64)>, AppError> {
        let rows = sqlx::query_as::<_, (i32, i64)>(
            r#"
            SELECT working_status_id, COUNT(*)
            FROM brand_creators
            WHERE brand_id = $1
            GROUP BY working_status_id
            ORDER BY working_status_id
            "#,
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn shipments_count(&self, brand_id: i64, provider: ShippingProvider) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_shipments WHERE brand_id = $1 AND provider = $2",
        )
        .bind(brand_id)
        .bind(provider.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
