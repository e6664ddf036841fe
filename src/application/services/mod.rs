//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CreatorScriptService**: index, setup, upsert and delete of creator scripts
//! - **BrandPerformanceSnapshot**: persists brand performance metrics
//! - **PerformanceItem**: calculators run by the snapshot

pub mod creator_script_service;
pub mod performance_items;
pub mod snapshot_service;

// Re-export creator script service types
pub use creator_script_service::{CreatorScriptError, CreatorScriptService, CreatorScriptServiceImpl};

// Re-export snapshot types
pub use performance_items::{default_performance_items, PerformanceItem};
pub use snapshot_service::{
    BrandPerformanceSnapshot, CollectingOutput, NullOutput, SnapshotError, SnapshotOptions,
    SnapshotOutput, SnapshotSummary, DEFAULT_CHUNK_SIZE,
};
