//! # Domain Layer
//!
//! The domain layer contains the core business rules of the brand admin.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Brands, creator scripts, metric snapshots and repository traits
//! - **value_objects**: Catalogs, script params and metric aspects
//! - **services**: Domain services such as automatic script naming

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
