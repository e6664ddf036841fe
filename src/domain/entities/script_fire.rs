//! Fire records of creator scripts.
//!
//! Maps to the `brand_creator_script_fires` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One execution of a script for one creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFire {
    pub id: i64,
    pub brand_creator_script_id: i64,
    pub creator_id: i64,
    pub fired_at: DateTime<Utc>,
}
