//! Response DTOs
//!
//! View models and redirect outcomes returned by the admin handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    ActionType, Brand, CreatorScript, EmailInfo, EventType, MetricAspect, MetricsSnapshot,
    Recipient, ScriptFire, ScriptListing, ScriptParams, SelectOption, WorkingStatus,
};
use crate::shared::error::FieldError;

/// A success message shown after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
}

/// State carried across one redirect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_notifications: Vec<Notification>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_input: Option<Value>,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success_notifications: vec![Notification { text: text.into() }],
            ..Default::default()
        }
    }

    pub fn failure(errors: Vec<FieldError>, old_input: Value) -> Self {
        Self {
            errors,
            old_input: Some(old_input),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.success_notifications.is_empty() && self.errors.is_empty() && self.old_input.is_none()
    }
}

/// Where a form submission sends the browser next.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRedirect {
    pub to: String,
    pub flash: Flash,
    pub succeeded: bool,
}

impl FormRedirect {
    pub fn success(to: impl Into<String>, notification: &str) -> Self {
        Self {
            to: to.into(),
            flash: Flash::success(notification),
            succeeded: true,
        }
    }

    pub fn back(to: impl Into<String>, errors: Vec<FieldError>, old_input: Value) -> Self {
        Self {
            to: to.into(),
            flash: Flash::failure(errors, old_input),
            succeeded: false,
        }
    }
}

/// JSON body of a redirect for clients that expect JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub redirect_to: String,
    pub flash: Flash,
}

impl From<FormRedirect> for RedirectResponse {
    fn from(redirect: FormRedirect) -> Self {
        Self {
            redirect_to: redirect.to,
            flash: redirect.flash,
        }
    }
}

/// A page view model with the flash state consumed for it.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(flatten)]
    pub body: T,

    #[serde(skip_serializing_if = "Flash::is_empty")]
    pub flash: Flash,
}

impl<T> Page<T> {
    pub fn new(body: T, flash: Flash) -> Self {
        Self { body, flash }
    }
}

/// Brand header shown on every script page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub id: i64,
    pub name: String,
    pub display_name: String,
}

impl From<&Brand> for BrandSummary {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
            display_name: brand.display_name().to_string(),
        }
    }
}

/// Creator script response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub id: i64,
    pub brand_id: i64,
    pub name: String,
    pub event_type_id: i32,
    pub event_type: Option<String>,
    pub action_type_id: i32,
    pub action_type: Option<String>,
    pub fire_limit_per_creator: Option<i32>,
    pub is_enabled: bool,
    pub params: ScriptParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_info: Option<EmailInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScriptResponse {
    pub fn new(script: CreatorScript, email_info: Option<EmailInfo>) -> Self {
        Self {
            event_type: script.event_type().map(|t| t.label().to_string()),
            action_type: script.action_type().map(|t| t.label().to_string()),
            id: script.id,
            brand_id: script.brand_id,
            name: script.name,
            event_type_id: script.event_type_id,
            action_type_id: script.action_type_id,
            fire_limit_per_creator: script.fire_limit_per_creator,
            is_enabled: script.is_enabled,
            params: script.params,
            email_info,
            created_at: script.created_at,
            updated_at: script.updated_at,
        }
    }
}

/// One row of the script index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptIndexItem {
    #[serde(flatten)]
    pub script: ScriptResponse,
    pub fire_count: i64,
}

impl From<ScriptListing> for ScriptIndexItem {
    fn from(listing: ScriptListing) -> Self {
        let email_info = EmailInfo::from(listing.email_content.as_ref());
        Self {
            script: ScriptResponse::new(listing.script, Some(email_info)),
            fire_count: listing.fire_count,
        }
    }
}

/// Script index page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptIndexPage {
    pub view: &'static str,
    pub brand: BrandSummary,
    pub items: Vec<ScriptIndexItem>,
}

/// Select options of the script form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupTemplate {
    pub event_type_options: Vec<SelectOption<i32>>,
    pub status_to_options: Vec<SelectOption<i32>>,
    pub action_type_options: Vec<SelectOption<i32>>,
    pub recipient_options: Vec<SelectOption<&'static str>>,
}

impl SetupTemplate {
    pub fn build() -> Self {
        Self {
            event_type_options: EventType::admin_setup_options(),
            status_to_options: WorkingStatus::admin_setup_options(),
            action_type_options: ActionType::admin_setup_options(),
            recipient_options: Recipient::admin_setup_options(),
        }
    }
}

/// Response of the create and edit form routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SetupPage {
    Template {
        template: SetupTemplate,
    },
    Create {
        view: &'static str,
        brand: BrandSummary,
    },
    Edit {
        view: &'static str,
        brand: BrandSummary,
        script: ScriptResponse,
        recent_fires: Vec<ScriptFire>,
    },
}

/// Outcome of a web-triggered performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub exit_code: i32,
    pub brands_processed: usize,
    pub values_written: usize,
    pub lines: Vec<String>,
}

/// One labelled metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValueResponse {
    pub metric_aspect_id: i32,
    pub aspect: Option<MetricAspect>,
    pub label: Option<&'static str>,
    pub value: f64,
}

/// Newest performance snapshot of a brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSnapshotResponse {
    pub brand_id: i64,
    pub group_id: i64,
    pub metric_group_category_id: i32,
    pub created_at: DateTime<Utc>,
    pub values: Vec<MetricValueResponse>,
}

impl From<MetricsSnapshot> for LatestSnapshotResponse {
    fn from(snapshot: MetricsSnapshot) -> Self {
        let values = snapshot
            .values
            .into_iter()
            .map(|v| {
                let aspect = MetricAspect::from_id(v.metric_aspect_id);
                MetricValueResponse {
                    metric_aspect_id: v.metric_aspect_id,
                    aspect,
                    label: aspect.map(MetricAspect::label),
                    value: v.value,
                }
            })
            .collect();

        Self {
            brand_id: snapshot.group.brand_id,
            group_id: snapshot.group.id,
            metric_group_category_id: snapshot.group.metric_group_category_id,
            created_at: snapshot.group.created_at,
            values,
        }
    }
}
