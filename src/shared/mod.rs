//! Shared Utilities
//!
//! Common types and helpers used across all layers.

pub mod admin_urls;
pub mod error;
pub mod input;
pub mod validation;
