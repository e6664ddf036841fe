//! Brand performance calculators.
//!
//! Each item reads brand activity through a [`BrandPerformanceSource`] and
//! returns the aspect values it is responsible for. The snapshot merges the
//! results in order, keeping the first value of an aspect.

use async_trait::async_trait;

use crate::domain::{
    AspectValues, Brand, BrandPerformanceSource, MetricAspect, ShippingProvider, WorkingStatus,
};
use crate::shared::error::AppError;

/// Lower bound of the middle content GMV tier
const GMV_TIER_MID: f64 = 100.0;

/// Lower bound of the high content GMV tier
const GMV_TIER_HIGH: f64 = 1000.0;

/// A calculator producing one or more metric aspects of a brand.
#[async_trait]
pub trait PerformanceItem: Send + Sync {
    fn name(&self) -> &'static str;

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError>;
}

/// The calculators run by the snapshot, in merge order.
pub fn default_performance_items() -> Vec<Box<dyn PerformanceItem>> {
    vec![
        Box::new(ContentWithGmvPerformanceItem),
        Box::new(ProductsSoldPerformanceItem),
        Box::new(GmvPerformanceItem),
        Box::new(ContentGmvByTiersPerformanceItem),
        Box::new(AvgOrderPricePerformanceItem),
        Box::new(ContentEngagementPerformanceItem),
        Box::new(CreatorsApprovedPerformanceItem),
        Box::new(ProductsShippedViaTikTok),
        Box::new(ProductsShippedViaShopify),
    ]
}

/// Content items that generated any GMV.
pub struct ContentWithGmvPerformanceItem;

#[async_trait]
impl PerformanceItem for ContentWithGmvPerformanceItem {
    fn name(&self) -> &'static str {
        "content_with_gmv"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let gmv = source.content_gmv(brand.id).await?;
        let count = gmv.iter().filter(|v| **v > 0.0).count();
        Ok(AspectValues::new().with(MetricAspect::ContentWithGmv, count as f64))
    }
}

pub struct ProductsSoldPerformanceItem;

#[async_trait]
impl PerformanceItem for ProductsSoldPerformanceItem {
    fn name(&self) -> &'static str {
        "products_sold"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let totals = source.order_totals(brand.id).await?;
        Ok(AspectValues::new().with(MetricAspect::ProductsSold, totals.items as f64))
    }
}

pub struct GmvPerformanceItem;

#[async_trait]
impl PerformanceItem for GmvPerformanceItem {
    fn name(&self) -> &'static str {
        "gmv"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let totals = source.order_totals(brand.id).await?;
        Ok(AspectValues::new().with(MetricAspect::Gmv, totals.gmv))
    }
}

/// Content counts bucketed by GMV: (0, 100), [100, 1000) and [1000, inf).
pub struct ContentGmvByTiersPerformanceItem;

#[async_trait]
impl PerformanceItem for ContentGmvByTiersPerformanceItem {
    fn name(&self) -> &'static str {
        "content_gmv_by_tiers"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let gmv = source.content_gmv(brand.id).await?;

        let (mut low, mut mid, mut high) = (0u64, 0u64, 0u64);
        for value in gmv.into_iter().filter(|v| *v > 0.0) {
            if value >= GMV_TIER_HIGH {
                high += 1;
            } else if value >= GMV_TIER_MID {
                mid += 1;
            } else {
                low += 1;
            }
        }

        Ok(AspectValues::new()
            .with(MetricAspect::ContentGmvTierLow, low as f64)
            .with(MetricAspect::ContentGmvTierMid, mid as f64)
            .with(MetricAspect::ContentGmvTierHigh, high as f64))
    }
}

pub struct AvgOrderPricePerformanceItem;

#[async_trait]
impl PerformanceItem for AvgOrderPricePerformanceItem {
    fn name(&self) -> &'static str {
        "avg_order_price"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let totals = source.order_totals(brand.id).await?;
        let avg = if totals.orders > 0 {
            totals.gmv / totals.orders as f64
        } else {
            0.0
        };
        Ok(AspectValues::new().with(MetricAspect::AvgOrderPrice, avg))
    }
}

/// Interactions on the brand's content and their ratio to views.
pub struct ContentEngagementPerformanceItem;

#[async_trait]
impl PerformanceItem for ContentEngagementPerformanceItem {
    fn name(&self) -> &'static str {
        "content_engagement"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let totals = source.engagement_totals(brand.id).await?;
        let interactions = totals.interactions() as f64;
        let rate = if totals.views > 0 {
            interactions / totals.views as f64
        } else {
            0.0
        };

        Ok(AspectValues::new()
            .with(MetricAspect::ContentEngagement, interactions)
            .with(MetricAspect::ContentEngagementRate, rate))
    }
}

pub struct CreatorsApprovedPerformanceItem;

#[async_trait]
impl PerformanceItem for CreatorsApprovedPerformanceItem {
    fn name(&self) -> &'static str {
        "creators_approved"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let approved: i64 = source
            .creator_status_counts(brand.id)
            .await?
            .into_iter()
            .filter(|(status_id, _)| {
                WorkingStatus::from_id(*status_id).is_some_and(WorkingStatus::is_approved_or_later)
            })
            .map(|(_, count)| count)
            .sum();

        Ok(AspectValues::new().with(MetricAspect::CreatorsApproved, approved as f64))
    }
}

pub struct ProductsShippedViaTikTok;

#[async_trait]
impl PerformanceItem for ProductsShippedViaTikTok {
    fn name(&self) -> &'static str {
        "products_shipped_via_tiktok"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let count = source.shipments_count(brand.id, ShippingProvider::TikTok).await?;
        Ok(AspectValues::new().with(MetricAspect::ProductsShippedViaTikTok, count as f64))
    }
}

pub struct ProductsShippedViaShopify;

#[async_trait]
impl PerformanceItem for ProductsShippedViaShopify {
    fn name(&self) -> &'static str {
        "products_shipped_via_shopify"
    }

    async fn calculate_aspects_values(
        &self,
        brand: &Brand,
        source: &dyn BrandPerformanceSource,
    ) -> Result<AspectValues, AppError> {
        let count = source.shipments_count(brand.id, ShippingProvider::Shopify).await?;
        Ok(AspectValues::new().with(MetricAspect::ProductsShippedViaShopify, count as f64))
    }
}
