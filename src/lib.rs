//! # Brand Admin Library
//!
//! Admin back office of a creator marketing platform:
//! - CRUD workflows for creator scripts (rules that fire on creator
//!   lifecycle events and send emails)
//! - A brand performance snapshot job, runnable from the console and
//!   from the admin API
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, catalogs and repository traits
//! - **Application Layer**: Services, performance calculators and DTOs
//! - **Infrastructure Layer**: PostgreSQL repositories and Prometheus metrics
//! - **Presentation Layer**: HTTP handlers, flash redirects and middleware
//!
//! ## Module Structure
//!
//! ```text
//! brand_admin/
//! +-- config/         Configuration management
//! +-- console/        CLI commands
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database repositories and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation, input scalars)
//! ```

// Configuration module
pub mod config;

// Console commands
pub mod console;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
