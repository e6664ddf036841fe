//! Creator Script Repository Implementation
//!
//! PostgreSQL implementation of the CreatorScriptRepository trait.
//! Script rows, their email template and fire records live in three tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{
    CreatorScript, CreatorScriptRepository, DeletedScript, EmailContentPatch, SaveCreatorScript,
    ScriptFire, ScriptListing, ScriptParams, ScriptTextContent, TextContentType,
};
use crate::shared::error::AppError;

const SCRIPT_COLUMNS: &str = "id, brand_id, name, event_type_id, action_type_id, \
     fire_limit_per_creator, is_enabled, params, created_at, updated_at";

const CONTENT_COLUMNS: &str =
    "id, brand_creator_script_id, content_type_id, subject, text, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ScriptRow {
    id: i64,
    brand_id: i64,
    name: String,
    event_type_id: i32,
    action_type_id: i32,
    fire_limit_per_creator: Option<i32>,
    is_enabled: bool,
    params: Json<ScriptParams>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScriptRow {
    fn into_script(self) -> CreatorScript {
        CreatorScript {
            id: self.id,
            brand_id: self.brand_id,
            name: self.name,
            event_type_id: self.event_type_id,
            action_type_id: self.action_type_id,
            fire_limit_per_creator: self.fire_limit_per_creator,
            is_enabled: self.is_enabled,
            params: self.params.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TextContentRow {
    id: i64,
    brand_creator_script_id: i64,
    content_type_id: i32,
    subject: Option<String>,
    text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TextContentRow> for ScriptTextContent {
    fn from(row: TextContentRow) -> Self {
        Self {
            id: row.id,
            brand_creator_script_id: row.brand_creator_script_id,
            content_type_id: row.content_type_id,
            subject: row.subject,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Script row with its email template columns (left joined) and fire count.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: i64,
    brand_id: i64,
    name: String,
    event_type_id: i32,
    action_type_id: i32,
    fire_limit_per_creator: Option<i32>,
    is_enabled: bool,
    params: Json<ScriptParams>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    content_id: Option<i64>,
    content_type_id: Option<i32>,
    content_subject: Option<String>,
    content_text: Option<String>,
    content_created_at: Option<DateTime<Utc>>,
    content_updated_at: Option<DateTime<Utc>>,
    fire_count: i64,
}

impl ListingRow {
    fn into_listing(self) -> ScriptListing {
        let email_content = match (
            self.content_id,
            self.content_type_id,
            self.content_created_at,
            self.content_updated_at,
        ) {
            (Some(id), Some(content_type_id), Some(created_at), Some(updated_at)) => {
                Some(ScriptTextContent {
                    id,
                    brand_creator_script_id: self.id,
                    content_type_id,
                    subject: self.content_subject,
                    text: self.content_text,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        ScriptListing {
            script: CreatorScript {
                id: self.id,
                brand_id: self.brand_id,
                name: self.name,
                event_type_id: self.event_type_id,
                action_type_id: self.action_type_id,
                fire_limit_per_creator: self.fire_limit_per_creator,
                is_enabled: self.is_enabled,
                params: self.params.0,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            email_content,
            fire_count: self.fire_count,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FireRow {
    id: i64,
    brand_creator_script_id: i64,
    creator_id: i64,
    fired_at: DateTime<Utc>,
}

/// PostgreSQL creator script repository implementation.
#[derive(Clone)]
pub struct PgCreatorScriptRepository {
    pool: PgPool,
}

impl PgCreatorScriptRepository {
    /// Create a new PgCreatorScriptRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_script(
        tx: &mut Transaction<'static, Postgres>,
        script: &SaveCreatorScript,
    ) -> Result<ScriptRow, AppError> {
        let row = sqlx::query_as::<_, ScriptRow>(&format!(
            r#"
            INSERT INTO brand_creator_scripts
                (brand_id, name, event_type_id, action_type_id, fire_limit_per_creator, is_enabled, params)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SCRIPT_COLUMNS}
            "#
        ))
        .bind(script.brand_id)
        .bind(&script.name)
        .bind(script.event_type_id)
        .bind(script.action_type_id)
        .bind(script.fire_limit_per_creator)
        .bind(script.is_enabled)
        .bind(Json(&script.params))
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    async fn update_script(
        tx: &mut Transaction<'static, Postgres>,
        id: i64,
        script: &SaveCreatorScript,
    ) -> Result<ScriptRow, AppError> {
        sqlx::query_as::<_, ScriptRow>(&format!(
            r#"
            UPDATE brand_creator_scripts
            SET name = $2,
                event_type_id = $3,
                action_type_id = $4,
                fire_limit_per_creator = $5,
                is_enabled = $6,
                params = $7,
                updated_at = NOW()
            WHERE id = $1 AND brand_id = $8
            RETURNING {SCRIPT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&script.name)
        .bind(script.event_type_id)
        .bind(script.action_type_id)
        .bind(script.fire_limit_per_creator)
        .bind(script.is_enabled)
        .bind(Json(&script.params))
        .bind(script.brand_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Creator script with id {} not found", id)))
    }

    /// Find-or-create the email template record and apply the patch.
    async fn sync_email_content(
        tx: &mut Transaction<'static, Postgres>,
        script_id: i64,
        patch: &EmailContentPatch,
    ) -> Result<(), AppError> {
        let content_type_id = TextContentType::EmailTemplate.id();

        let existing = sqlx::query_as::<_, TextContentRow>(&format!(
            r#"
            SELECT {CONTENT_COLUMNS}
            FROM brand_creator_script_text_contents
            WHERE brand_creator_script_id = $1 AND content_type_id = $2
            FOR UPDATE
            "#
        ))
        .bind(script_id)
        .bind(content_type_id)
        .fetch_optional(&mut **tx)
        .await?
        .map(ScriptTextContent::from);

        let (subject, text) = patch.merged(existing.as_ref());

        match existing {
            Some(record) => {
                sqlx::query(
                    r#"
                    UPDATE brand_creator_script_text_contents
                    SET subject = $2, text = $3, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(record.id)
                .bind(subject)
                .bind(text)
                .execute(&mut **tx)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO brand_creator_script_text_contents
                        (brand_creator_script_id, content_type_id, subject, text)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(script_id)
                .bind(content_type_id)
                .bind(subject)
                .bind(text)
                .execute(&mut **tx)
                .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CreatorScriptRepository for PgCreatorScriptRepository {
    async fn list_for_brand(&self, brand_id: i64) -> Result<Vec<ScriptListing>, AppError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT s.id, s.brand_id, s.name, s.event_type_id, s.action_type_id,
                   s.fire_limit_per_creator, s.is_enabled, s.params, s.created_at, s.updated_at,
                   c.id AS content_id,
                   c.content_type_id AS content_type_id,
                   c.subject AS content_subject,
                   c.text AS content_text,
                   c.created_at AS content_created_at,
                   c.updated_at AS content_updated_at,
                   (SELECT COUNT(*)
                    FROM brand_creator_script_fires f
                    WHERE f.brand_creator_script_id = s.id) AS fire_count
            FROM brand_creator_scripts s
            LEFT JOIN brand_creator_script_text_contents c
                   ON c.brand_creator_script_id = s.id AND c.content_type_id = $2
            WHERE s.brand_id = $1
            ORDER BY s.event_type_id ASC, s.action_type_id ASC, s.is_enabled DESC, s.id ASC
            "#,
        )
        .bind(brand_id)
        .bind(TextContentType::EmailTemplate.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ListingRow::into_listing).collect())
    }

    async fn find_for_brand(
        &self,
        brand_id: i64,
        script_id: i64,
    ) -> Result<Option<CreatorScript>, AppError> {
        let row = sqlx::query_as::<_, ScriptRow>(&format!(
            "SELECT {SCRIPT_COLUMNS} FROM brand_creator_scripts WHERE id = $1 AND brand_id = $2"
        ))
        .bind(script_id)
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScriptRow::into_script))
    }

    async fn find_email_content(&self, script_id: i64) -> Result<Option<ScriptTextContent>, AppError> {
        let row = sqlx::query_as::<_, TextContentRow>(&format!(
            r#"
            SELECT {CONTENT_COLUMNS}
            FROM brand_creator_script_text_contents
            WHERE brand_creator_script_id = $1 AND content_type_id = $2
            "#
        ))
        .bind(script_id)
        .bind(TextContentType::EmailTemplate.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScriptTextContent::from))
    }

    async fn recent_fires(&self, script_id: i64, limit: i64) -> Result<Vec<ScriptFire>, AppError> {
        let rows = sqlx::query_as::<_, FireRow>(
            r#"
            SELECT id, brand_creator_script_id, creator_id, fired_at
            FROM brand_creator_script_fires
            WHERE brand_creator_script_id = $1
            ORDER BY fired_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(script_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ScriptFire {
                id: r.id,
                brand_creator_script_id: r.brand_creator_script_id,
                creator_id: r.creator_id,
                fired_at: r.fired_at,
            })
            .collect())
    }

    async fn save(
        &self,
        script: SaveCreatorScript,
        email: Option<EmailContentPatch>,
    ) -> Result<CreatorScript, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = match script.id {
            Some(id) => Self::update_script(&mut tx, id, &script).await?,
            None => Self::insert_script(&mut tx, &script).await?,
        };

        if let Some(patch) = &email {
            Self::sync_email_content(&mut tx, row.id, patch).await?;
        }

        tx.commit().await?;

        Ok(row.into_script())
    }

    async fn delete(&self, script_id: i64) -> Result<DeletedScript, AppError> {
        let mut tx = self.pool.begin().await?;

        let text_contents = sqlx::query(
            "DELETE FROM brand_creator_script_text_contents WHERE brand_creator_script_id = $1",
        )
        .bind(script_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let fires = sqlx::query(
            "DELETE FROM brand_creator_script_fires WHERE brand_creator_script_id = $1",
        )
        .bind(script_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let result = sqlx::query("DELETE FROM brand_creator_scripts WHERE id = $1")
            .bind(script_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Creator script with id {} not found",
                script_id
            )));
        }

        tx.commit().await?;

        Ok(DeletedScript {
            text_contents,
            fires,
        })
    }
}
