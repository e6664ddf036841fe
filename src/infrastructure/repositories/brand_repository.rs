//! Brand Repository Implementation
//!
//! PostgreSQL implementation of the BrandRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Brand, BrandData, BrandPage, BrandRepository};
use crate::shared::error::AppError;

/// Database row of `brands` left-joined with `brand_data`.
#[derive(Debug, sqlx::FromRow)]
struct BrandRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    has_data: bool,
    display_name: Option<String>,
    website_url: Option<String>,
}

impl BrandRow {
    fn into_brand(self) -> Brand {
        let data = self.has_data.then(|| BrandData {
            display_name: self.display_name,
            website_url: self.website_url,
        });
        Brand {
            id: self.id,
            name: self.name,
            data,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL brand repository implementation.
#[derive(Clone)]
pub struct PgBrandRepository {
    pool: PgPool,
}

impl PgBrandRepository {
    /// Create a new PgBrandRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Brand>, AppError> {
        let row = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT b.id, b.name, b.created_at, b.updated_at,
                   (d.brand_id IS NOT NULL) AS has_data,
                   d.display_name, d.website_url
            FROM brands b
            LEFT JOIN brand_data d ON d.brand_id = b.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BrandRow::into_brand))
    }

    async fn find_snapshot_page(&self, page: &BrandPage) -> Result<Vec<Brand>, AppError> {
        let rows = sqlx::query_as::<_, BrandRow>(
            r#"
            SELECT b.id, b.name, b.created_at, b.updated_at,
                   TRUE AS has_data,
                   d.display_name, d.website_url
            FROM brands b
            INNER JOIN brand_data d ON d.brand_id = b.id
            WHERE (cardinality($1::BIGINT[]) = 0 OR b.id = ANY($1::BIGINT[]))
              AND ($2::BIGINT IS NULL OR b.id < $2)
            ORDER BY b.id DESC
            LIMIT $3
            "#,
        )
        .bind(&page.ids)
        .bind(page.before_id)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BrandRow::into_brand).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::test_rows;
    use pretty_assertions::assert_eq;

    async fn seed(pool: &PgPool) {
        for id in 1..=5 {
            test_rows::brand(pool, id, true).await;
        }
        test_rows::brand(pool, 6, false).await;
    }

    fn ids(brands: &[Brand]) -> Vec<i64> {
        brands.iter().map(|b| b.id).collect()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_snapshot_pages_walk_down_by_id(pool: PgPool) {
        seed(&pool).await;
        let repo = PgBrandRepository::new(pool);

        let mut page = BrandPage { ids: vec![], before_id: None, limit: 2 };
        let mut seen = Vec::new();
        loop {
            let brands = repo.find_snapshot_page(&page).await.unwrap();
            let Some(last) = brands.last() else { break };
            page.before_id = Some(last.id);
            seen.push(ids(&brands));
        }

        assert_eq!(seen, vec![vec![5, 4], vec![3, 2], vec![1]]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_snapshot_page_filters_ids_and_skips_brands_without_data(pool: PgPool) {
        seed(&pool).await;
        let repo = PgBrandRepository::new(pool);

        let page = BrandPage { ids: vec![1, 3, 6, 42], before_id: None, limit: 10 };
        let brands = repo.find_snapshot_page(&page).await.unwrap();

        assert_eq!(ids(&brands), vec![3, 1]);
        assert_eq!(
            brands[0].data.as_ref().and_then(|d| d.display_name.as_deref()),
            Some("Brand 3")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_find_by_id_with_and_without_data(pool: PgPool) {
        seed(&pool).await;
        let repo = PgBrandRepository::new(pool);

        assert!(repo.find_by_id(2).await.unwrap().unwrap().data.is_some());
        assert!(repo.find_by_id(6).await.unwrap().unwrap().data.is_none());
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }
}
