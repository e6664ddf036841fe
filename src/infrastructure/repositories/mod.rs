//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **BrandRepository** - Brands with their data rows, snapshot paging
//! - **CreatorScriptRepository** - Creator scripts, email templates, fire records
//! - **MetricsRepository** - Metric snapshot groups and values
//! - **BrandPerformanceSource** - Aggregated brand activity for the calculators
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use brand_admin::infrastructure::repositories::{PgBrandRepository, PgCreatorScriptRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let brand_repo = PgBrandRepository::new(pool.clone());
//!     let script_repo = PgCreatorScriptRepository::new(pool);
//! }
//! ```

pub mod brand_repository;
pub mod creator_script_repository;
pub mod metrics_repository;
pub mod performance_repository;

pub use brand_repository::PgBrandRepository;
pub use creator_script_repository::PgCreatorScriptRepository;
pub use metrics_repository::PgMetricsRepository;
pub use performance_repository::PgBrandPerformanceSource;
