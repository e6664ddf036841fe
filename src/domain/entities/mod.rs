//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! brand admin. All entities map directly to their database tables.
//!
//! ## Core Entities
//!
//! - **Brand**: tenant owning creator scripts and metrics ("promoter")
//! - **CreatorScript**: rule firing on a creator lifecycle event
//! - **ScriptTextContent**: email template of a script
//! - **ScriptFire**: record of a script firing for a creator
//! - **MetricsGroup / MetricsValue**: performance snapshot rows
//!
//! ## Repository Traits
//!
//! Each aggregate has a repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer.

mod brand;
mod creator_script;
mod metrics;
mod performance;
mod script_fire;
mod text_content;

pub use brand::{Brand, BrandData, BrandPage, BrandRepository};
pub use creator_script::{
    CreatorScript, CreatorScriptRepository, DeletedScript, SaveCreatorScript, ScriptListing,
};
pub use metrics::{MetricsGroup, MetricsRepository, MetricsSnapshot, MetricsValue};
pub use performance::{BrandPerformanceSource, EngagementTotals, OrderTotals, ShippingProvider};
pub use script_fire::ScriptFire;
pub use text_content::{EmailContentPatch, EmailInfo, ScriptTextContent};

#[cfg(test)]
pub use brand::MockBrandRepository;
#[cfg(test)]
pub use creator_script::MockCreatorScriptRepository;
#[cfg(test)]
pub use metrics::MockMetricsRepository;
#[cfg(test)]
pub use performance::MockBrandPerformanceSource;
