//! Read model of brand activity used by the performance calculators.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Order aggregates of a brand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderTotals {
    pub orders: i64,
    pub items: i64,
    pub gmv: f64,
}

/// Engagement aggregates over a brand's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementTotals {
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

impl EngagementTotals {
    pub fn interactions(&self) -> i64 {
        self.likes + self.comments + self.shares
    }
}

/// Where a product shipment was fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingProvider {
    TikTok,
    Shopify,
}

impl ShippingProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            ShippingProvider::TikTok => "tiktok",
            ShippingProvider::Shopify => "shopify",
        }
    }
}

/// Source of raw brand activity figures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandPerformanceSource: Send + Sync {
    /// GMV of every content item of the brand.
    async fn content_gmv(&self, brand_id: i64) -> Result<Vec<f64>, AppError>;

    async fn order_totals(&self, brand_id: i64) -> Result<OrderTotals, AppError>;

    async fn engagement_totals(&self, brand_id: i64) -> Result<EngagementTotals, AppError>;

    /// `(working_status_id, creator count)` pairs.
    async fn creator_status_counts(&self, brand_id: i64) -> Result<Vec<(i32, i64)>, AppError>;

    async fn shipments_count(&self, brand_id: i64, provider: ShippingProvider) -> Result<i64, AppError>;
}
