//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Catalogs**: event types, action types, working statuses, recipients
//! - **ScriptParams**: the JSON parameter bag of a creator script
//! - **MetricAspect**: dimensions written by the performance snapshot

mod catalogs;
mod metric_aspect;
mod script_params;

pub use catalogs::*;
pub use metric_aspect::*;
pub use script_params::*;
