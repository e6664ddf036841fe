//! Brand entity and repository trait.
//!
//! Maps to the `brands` table joined with its optional `brand_data` row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A brand ("promoter") owning creator scripts and metric snapshots.
///
/// Maps to the `brands` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,

    pub name: String,

    /// Profile row; brands without one are skipped by the performance snapshot
    pub data: Option<BrandData>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// One-to-one profile data of a brand (`brand_data` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandData {
    pub display_name: Option<String>,
    pub website_url: Option<String>,
}

impl Brand {
    /// Name shown in the admin panel.
    pub fn display_name(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.display_name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// One page of the snapshot brand query.
///
/// Brands with a data row, ordered by id descending, strictly below
/// `before_id` when set, restricted to `ids` when non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandPage {
    pub ids: Vec<i64>,
    pub before_id: Option<i64>,
    pub limit: i64,
}

/// Repository trait for Brand data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Find a brand by id, with its data row.
    async fn find_by_id(&self, id: i64) -> Result<Option<Brand>, AppError>;

    /// Load one page of brands for the performance snapshot.
    async fn find_snapshot_page(&self, page: &BrandPage) -> Result<Vec<Brand>, AppError>;
}
