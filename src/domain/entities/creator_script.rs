//! Creator script entity and repository trait.
//!
//! Maps to the `brand_creator_scripts` table. A script belongs to a brand,
//! has many fire records and at most one email template text content.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::script_fire::ScriptFire;
use super::text_content::{EmailContentPatch, ScriptTextContent};
use crate::domain::value_objects::{ActionType, EventType, ScriptParams};
use crate::shared::error::AppError;

/// A rule that fires on a creator lifecycle event and triggers an action.
///
/// Maps to the `brand_creator_scripts` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - brand_id: BIGINT NOT NULL REFERENCES brands(id)
/// - name: VARCHAR(255) NOT NULL
/// - event_type_id: INTEGER NOT NULL
/// - action_type_id: INTEGER NOT NULL
/// - fire_limit_per_creator: INTEGER NULL
/// - is_enabled: BOOLEAN NOT NULL
/// - params: JSONB NOT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorScript {
    pub id: i64,

    pub brand_id: i64,

    pub name: String,

    pub event_type_id: i32,

    pub action_type_id: i32,

    /// Max number of fires per creator, unlimited when `None`
    pub fire_limit_per_creator: Option<i32>,

    pub is_enabled: bool,

    pub params: ScriptParams,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CreatorScript {
    pub fn event_type(&self) -> Option<EventType> {
        EventType::from_id(self.event_type_id)
    }

    pub fn action_type(&self) -> Option<ActionType> {
        ActionType::from_id(self.action_type_id)
    }
}

/// Values written by [`CreatorScriptRepository::save`].
///
/// `id == None` inserts a new row, otherwise the row is updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveCreatorScript {
    pub id: Option<i64>,
    pub brand_id: i64,
    pub name: String,
    pub event_type_id: i32,
    pub action_type_id: i32,
    pub fire_limit_per_creator: Option<i32>,
    pub is_enabled: bool,
    pub params: ScriptParams,
}

/// A script as shown on the brand's script index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptListing {
    pub script: CreatorScript,
    pub email_content: Option<ScriptTextContent>,
    pub fire_count: i64,
}

/// Row counts removed together with a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedScript {
    pub text_contents: u64,
    pub fires: u64,
}

/// Repository trait for creator script data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatorScriptRepository: Send + Sync {
    /// Scripts of a brand ordered by event type, action type, then enabled first.
    async fn list_for_brand(&self, brand_id: i64) -> Result<Vec<ScriptListing>, AppError>;

    /// Find a script by id, scoped to its brand.
    async fn find_for_brand(&self, brand_id: i64, script_id: i64) -> Result<Option<CreatorScript>, AppError>;

    /// The email template record of a script.
    async fn find_email_content(&self, script_id: i64) -> Result<Option<ScriptTextContent>, AppError>;

    /// Most recent fire records of a script.
    async fn recent_fires(&self, script_id: i64, limit: i64) -> Result<Vec<ScriptFire>, AppError>;

    /// Insert or update a script and, when given, sync its email template
    /// record in the same transaction.
    async fn save(
        &self,
        script: SaveCreatorScript,
        email: Option<EmailContentPatch>,
    ) -> Result<CreatorScript, AppError>;

    /// Delete a script with its text contents and fire records.
    async fn delete(&self, script_id: i64) -> Result<DeletedScript, AppError>;
}
