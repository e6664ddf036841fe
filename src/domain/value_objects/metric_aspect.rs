//! Metric aspects written by the brand performance snapshot.

use serde::Serialize;

/// A single measured dimension of brand performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricAspect {
    ContentWithGmv,
    ProductsSold,
    Gmv,
    ContentGmvTierLow,
    ContentGmvTierMid,
    ContentGmvTierHigh,
    AvgOrderPrice,
    ContentEngagement,
    ContentEngagementRate,
    CreatorsApproved,
    ProductsShippedViaTikTok,
    ProductsShippedViaShopify,
}

impl MetricAspect {
    pub const ALL: [MetricAspect; 12] = [
        MetricAspect::ContentWithGmv,
        MetricAspect::ProductsSold,
        MetricAspect::Gmv,
        MetricAspect::ContentGmvTierLow,
        MetricAspect::ContentGmvTierMid,
        MetricAspect::ContentGmvTierHigh,
        MetricAspect::AvgOrderPrice,
        MetricAspect::ContentEngagement,
        MetricAspect::ContentEngagementRate,
        MetricAspect::CreatorsApproved,
        MetricAspect::ProductsShippedViaTikTok,
        MetricAspect::ProductsShippedViaShopify,
    ];

    pub fn id(self) -> i32 {
        match self {
            MetricAspect::ContentWithGmv => 1,
            MetricAspect::ProductsSold => 2,
            MetricAspect::Gmv => 3,
            MetricAspect::ContentGmvTierLow => 4,
            MetricAspect::ContentGmvTierMid => 5,
            MetricAspect::ContentGmvTierHigh => 6,
            MetricAspect::AvgOrderPrice => 7,
            MetricAspect::ContentEngagement => 8,
            MetricAspect::ContentEngagementRate => 9,
            MetricAspect::CreatorsApproved => 10,
            MetricAspect::ProductsShippedViaTikTok => 11,
            MetricAspect::ProductsShippedViaShopify => 12,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricAspect::ContentWithGmv => "Content with GMV",
            MetricAspect::ProductsSold => "Products sold",
            MetricAspect::Gmv => "GMV",
            MetricAspect::ContentGmvTierLow => "Content GMV under 100",
            MetricAspect::ContentGmvTierMid => "Content GMV 100 to 1000",
            MetricAspect::ContentGmvTierHigh => "Content GMV 1000 and above",
            MetricAspect::AvgOrderPrice => "Average order price",
            MetricAspect::ContentEngagement => "Content engagement",
            MetricAspect::ContentEngagementRate => "Content engagement rate",
            MetricAspect::CreatorsApproved => "Creators approved",
            MetricAspect::ProductsShippedViaTikTok => "Products shipped via TikTok",
            MetricAspect::ProductsShippedViaShopify => "Products shipped via Shopify",
        }
    }
}

/// Aspect values in the order they were calculated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectValues(Vec<(MetricAspect, f64)>);

impl AspectValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, aspect: MetricAspect, value: f64) -> Self {
        self.insert_if_absent(aspect, value);
        self
    }

    /// Add a value unless the aspect is already present. The first value wins.
    pub fn insert_if_absent(&mut self, aspect: MetricAspect, value: f64) {
        if !self.contains(aspect) {
            self.0.push((aspect, value));
        }
    }

    /// Union with another set, keeping existing values on collision.
    pub fn merge(&mut self, other: AspectValues) {
        for (aspect, value) in other.0 {
            self.insert_if_absent(aspect, value);
        }
    }

    pub fn contains(&self, aspect: MetricAspect) -> bool {
        self.0.iter().any(|(a, _)| *a == aspect)
    }

    pub fn get(&self, aspect: MetricAspect) -> Option<f64> {
        self.0.iter().find(|(a, _)| *a == aspect).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(MetricAspect, f64)> {
        self.0.iter()
    }
}

impl IntoIterator for AspectValues {
    type Item = (MetricAspect, f64);
    type IntoIter = std::vec::IntoIter<(MetricAspect, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ids_are_unique() {
        let mut ids: Vec<i32> = MetricAspect::ALL.iter().map(|a| a.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MetricAspect::ALL.len());
    }

    #[test]
    fn test_merge_keeps_first_value() {
        let mut values = AspectValues::new().with(MetricAspect::Gmv, 10.0);
        values.merge(
            AspectValues::new()
                .with(MetricAspect::Gmv, 99.0)
                .with(MetricAspect::ProductsSold, 3.0),
        );

        assert_eq!(values.get(MetricAspect::Gmv), Some(10.0));
        assert_eq!(values.get(MetricAspect::ProductsSold), Some(3.0));
        assert_eq!(values.len(), 2);
    }
}
