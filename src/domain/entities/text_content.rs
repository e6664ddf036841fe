//! Text content attached to creator scripts.
//!
//! Maps to the `brand_creator_script_text_contents` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A text blob of a given content type belonging to one script.
///
/// At most one row exists per (script, content type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTextContent {
    pub id: i64,
    pub brand_creator_script_id: i64,
    pub content_type_id: i32,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subject and text of a script's email template, empty when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailInfo {
    pub subject: String,
    pub text: String,
}

impl From<Option<&ScriptTextContent>> for EmailInfo {
    fn from(record: Option<&ScriptTextContent>) -> Self {
        match record {
            Some(record) => Self {
                subject: record.subject.clone().unwrap_or_default(),
                text: record.text.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

/// Partial update of the email template record.
///
/// The outer `Option` tells whether the key was submitted, the inner one
/// carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailContentPatch {
    pub subject: Option<Option<String>>,
    pub text: Option<Option<String>>,
}

impl EmailContentPatch {
    /// Subject and text after applying this patch to `existing`.
    pub fn merged(&self, existing: Option<&ScriptTextContent>) -> (Option<String>, Option<String>) {
        let subject = match &self.subject {
            Some(subject) => subject.clone(),
            None => existing.and_then(|e| e.subject.clone()),
        };
        let text = match &self.text {
            Some(text) => text.clone(),
            None => existing.and_then(|e| e.text.clone()),
        };
        (subject, text)
    }
}
