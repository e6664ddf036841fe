//! The JSON `params` bag of a creator script.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalogs::{Recipient, UnknownId, WorkingStatus};

/// Loosely typed script parameters stored in a JSONB column.
///
/// Which keys matter depends on the script's event and action types.
/// Keys this type does not know about are kept in `extra` so that a
/// write never drops data another writer put there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptParams {
    /// Previous working status for status change events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_from: Option<i32>,

    /// Target working status for status change events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_to: Option<i32>,

    /// `creator` or `la_admin`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Timeout for status timeout events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_hours: Option<i32>,

    /// Watched working status for status timeout events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScriptParams {
    pub fn status_to(&self) -> Result<WorkingStatus, UnknownId> {
        WorkingStatus::find_or_fail(self.status_to)
    }

    pub fn status(&self) -> Result<WorkingStatus, UnknownId> {
        WorkingStatus::find_or_fail(self.status)
    }

    pub fn recipient(&self) -> Option<Recipient> {
        self.recipient.as_deref().and_then(Recipient::parse)
    }

    /// Timeout rounded to whole days, half away from zero. A missing value counts as zero.
    pub fn timeout_in_round_days(&self) -> i64 {
        (f64::from(self.timeout_hours.unwrap_or(0)) / 24.0).round() as i64
    }
}
