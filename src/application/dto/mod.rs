//! Data Transfer Objects
//!
//! DTOs for admin request bodies, view models and redirect outcomes.

pub mod request;
pub mod response;

pub use request::{
    DestroyQuery, EmailInput, FormMeta, ParamsInput, SnapshotIds, SnapshotRequest,
    UpsertCreatorScriptRequest,
};
pub use response::{
    BrandSummary, Flash, FormRedirect, LatestSnapshotResponse, MetricValueResponse, Notification,
    Page, RedirectResponse, ScriptIndexItem, ScriptIndexPage, ScriptResponse, SetupPage,
    SetupTemplate, SnapshotReport,
};
