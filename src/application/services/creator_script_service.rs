//! Creator Script Service
//!
//! Admin workflows of creator scripts: index, setup (create and edit forms),
//! upsert (store and patch) and delete. Create and update share one flow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::dto::{
    BrandSummary, FormRedirect, ParamsInput, ScriptIndexItem, ScriptIndexPage, ScriptResponse,
    SetupPage, SetupTemplate, UpsertCreatorScriptRequest,
};
use crate::domain::services::ScriptNamer;
use crate::domain::{
    ActionType, Brand, BrandRepository, CreatorScript, CreatorScriptRepository, EmailInfo,
    EventType, SaveCreatorScript, ScriptParams,
};
use crate::infrastructure::metrics;
use crate::shared::admin_urls;
use crate::shared::error::{AppError, FieldError};

/// Fire records shown on the edit page.
const RECENT_FIRES_LIMIT: i64 = 20;

/// Creator script service trait
#[async_trait]
pub trait CreatorScriptService: Send + Sync {
    /// Scripts of a brand for the index page
    async fn index(&self, brand_id: i64) -> Result<ScriptIndexPage, CreatorScriptError>;

    /// Create form (`script_id == None`) or edit form support
    async fn setup(
        &self,
        brand_id: i64,
        script_id: Option<i64>,
        expects_json: bool,
    ) -> Result<SetupPage, CreatorScriptError>;

    /// Store (`script_id == None`) or patch a script from a submitted form body
    async fn upsert(
        &self,
        brand_id: i64,
        script_id: Option<i64>,
        body: Value,
    ) -> Result<FormRedirect, CreatorScriptError>;

    /// Delete a script with its text contents and fire records
    async fn delete(
        &self,
        brand_id: i64,
        script_id: i64,
        back_url: Option<String>,
    ) -> Result<FormRedirect, CreatorScriptError>;
}

/// Creator script service errors
#[derive(Debug, thiserror::Error)]
pub enum CreatorScriptError {
    #[error("Brand with id {0} not found")]
    BrandNotFound(i64),

    #[error("Creator script with id {0} not found")]
    ScriptNotFound(i64),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<CreatorScriptError> for AppError {
    fn from(err: CreatorScriptError) -> Self {
        match err {
            CreatorScriptError::BrandNotFound(_) | CreatorScriptError::ScriptNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            CreatorScriptError::Repository(e) => e,
        }
    }
}

/// CreatorScriptService implementation
pub struct CreatorScriptServiceImpl {
    brand_repo: Arc<dyn BrandRepository>,
    script_repo: Arc<dyn CreatorScriptRepository>,
}

impl CreatorScriptServiceImpl {
    pub fn new(
        brand_repo: Arc<dyn BrandRepository>,
        script_repo: Arc<dyn CreatorScriptRepository>,
    ) -> Self {
        Self {
            brand_repo,
            script_repo,
        }
    }

    async fn load_brand(&self, brand_id: i64) -> Result<Brand, CreatorScriptError> {
        self.brand_repo
            .find_by_id(brand_id)
            .await?
            .ok_or(CreatorScriptError::BrandNotFound(brand_id))
    }

    async fn load_script(&self, brand_id: i64, script_id: i64) -> Result<CreatorScript, CreatorScriptError> {
        self.script_repo
            .find_for_brand(brand_id, script_id)
            .await?
            .ok_or(CreatorScriptError::ScriptNotFound(script_id))
    }

    async fn persist(
        &self,
        brand_id: i64,
        existing: Option<CreatorScript>,
        input: &UpsertCreatorScriptRequest,
    ) -> Result<CreatorScript, AppError> {
        let creating = existing.is_none();
        let mut draft = existing.map(ScriptDraft::from).unwrap_or_default();

        draft.fill(input);
        if let Some(params) = &input.params {
            draft.apply_params(params);
        }

        let script = draft.into_save(brand_id)?;
        self.script_repo.save(script, input.email_patch(creating)).await
    }
}

#[async_trait]
impl CreatorScriptService for CreatorScriptServiceImpl {
    async fn index(&self, brand_id: i64) -> Result<ScriptIndexPage, CreatorScriptError> {
        let brand = self.load_brand(brand_id).await?;
        let items = self
            .script_repo
            .list_for_brand(brand.id)
            .await?
            .into_iter()
            .map(ScriptIndexItem::from)
            .collect();

        Ok(ScriptIndexPage {
            view: "index",
            brand: BrandSummary::from(&brand),
            items,
        })
    }

    async fn setup(
        &self,
        brand_id: i64,
        script_id: Option<i64>,
        expects_json: bool,
    ) -> Result<SetupPage, CreatorScriptError> {
        let brand = self.load_brand(brand_id).await?;

        let script = match script_id {
            Some(id) => {
                let script = self.load_script(brand.id, id).await?;
                let content = self.script_repo.find_email_content(script.id).await?;
                Some((script, EmailInfo::from(content.as_ref())))
            }
            None => None,
        };

        if expects_json {
            return Ok(SetupPage::Template {
                template: SetupTemplate::build(),
            });
        }

        match script {
            None => Ok(SetupPage::Create {
                view: "create",
                brand: BrandSummary::from(&brand),
            }),
            Some((script, email_info)) => {
                let recent_fires = self
                    .script_repo
                    .recent_fires(script.id, RECENT_FIRES_LIMIT)
                    .await?;
                Ok(SetupPage::Edit {
                    view: "edit",
                    brand: BrandSummary::from(&brand),
                    script: ScriptResponse::new(script, Some(email_info)),
                    recent_fires,
                })
            }
        }
    }

    async fn upsert(
        &self,
        brand_id: i64,
        script_id: Option<i64>,
        body: Value,
    ) -> Result<FormRedirect, CreatorScriptError> {
        let brand = self.load_brand(brand_id).await?;
        let existing = match script_id {
            Some(id) => Some(self.load_script(brand.id, id).await?),
            None => None,
        };
        let creating = existing.is_none();
        let operation = if creating { "create" } else { "update" };

        let old_input = UpsertCreatorScriptRequest::old_input(&body);
        let (mut input, type_errors) = UpsertCreatorScriptRequest::from_body(body);

        let success_url = input
            .back_url()
            .map(str::to_string)
            .unwrap_or_else(|| admin_urls::script_index(brand.id));
        let error_url = match &existing {
            Some(script) => admin_urls::script_edit(brand.id, script.id),
            None => admin_urls::script_create(brand.id),
        };

        // The recipient is fixed once the script exists
        if let Some(script) = &existing {
            input.force_recipient(script.params.recipient.clone());
        }

        let mut errors = type_errors;
        if let Err(rule_errors) = input.validate_for_recipient() {
            errors.extend(rule_errors);
        }
        if !errors.is_empty() {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            debug!(brand_id = brand.id, ?script_id, errors = errors.len(), "Creator script input rejected");
            return Ok(FormRedirect::back(error_url, errors, old_input));
        }

        match self.persist(brand.id, existing, &input).await {
            Ok(script) => {
                metrics::record_script_mutation(operation, true);
                info!(
                    brand_id = brand.id,
                    script_id = script.id,
                    name = %script.name,
                    "Creator script {}d", operation
                );
                let notification = if creating {
                    "New Creator Script Created"
                } else {
                    "Changes saved"
                };
                Ok(FormRedirect::success(success_url, notification))
            }
            Err(e) => {
                metrics::record_script_mutation(operation, false);
                warn!(brand_id = brand.id, ?script_id, error = %e, "Failed to save creator script");
                Ok(FormRedirect::back(
                    error_url,
                    vec![FieldError::new("error", e.to_string())],
                    old_input,
                ))
            }
        }
    }

    async fn delete(
        &self,
        brand_id: i64,
        script_id: i64,
        back_url: Option<String>,
    ) -> Result<FormRedirect, CreatorScriptError> {
        let brand = self.load_brand(brand_id).await?;
        let script = self.load_script(brand.id, script_id).await?;

        let deleted = match self.script_repo.delete(script.id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                metrics::record_script_mutation("delete", false);
                return Err(e.into());
            }
        };
        metrics::record_script_mutation("delete", true);

        info!(
            brand_id = brand.id,
            script_id = script.id,
            text_contents = deleted.text_contents,
            fires = deleted.fires,
            "Creator script deleted"
        );

        let to = back_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| admin_urls::script_index(brand.id));
        Ok(FormRedirect::success(to, "Deleted"))
    }
}

/// Script fields while an upsert is being applied.
#[derive(Debug, Default)]
struct ScriptDraft {
    id: Option<i64>,
    name: Option<String>,
    event_type_id: Option<i32>,
    action_type_id: Option<i32>,
    fire_limit_per_creator: Option<i32>,
    is_enabled: bool,
    params: ScriptParams,
}

impl From<CreatorScript> for ScriptDraft {
    fn from(script: CreatorScript) -> Self {
        Self {
            id: Some(script.id),
            name: Some(script.name),
            event_type_id: Some(script.event_type_id),
            action_type_id: Some(script.action_type_id),
            fire_limit_per_creator: script.fire_limit_per_creator,
            is_enabled: script.is_enabled,
            params: script.params,
        }
    }
}

impl ScriptDraft {
    /// Copy the submitted scalar fields.
    fn fill(&mut self, input: &UpsertCreatorScriptRequest) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        if let Some(id) = input.event_type_id.as_ref().and_then(|v| v.to_i32()) {
            self.event_type_id = Some(id);
        }
        if let Some(id) = input.action_type_id.as_ref().and_then(|v| v.to_i32()) {
            self.action_type_id = Some(id);
        }
        if let Some(limit) = &input.fire_limit_per_creator {
            self.fire_limit_per_creator = limit.as_ref().and_then(|v| v.to_i32());
        }
        if let Some(enabled) = input.is_enabled.as_ref().and_then(|f| f.as_bool()) {
            self.is_enabled = enabled;
        }
    }

    /// Merge the params that matter for the script's event and action types.
    fn apply_params(&mut self, params: &ParamsInput) {
        if self.action_type_id == Some(ActionType::SendEmail.id()) {
            if let Some(recipient) = &params.recipient {
                self.params.recipient = Some(recipient.clone());
            }
        }

        match self.event_type_id.and_then(EventType::from_id) {
            Some(EventType::WorkingStatusChange) => {
                if let Some(status_to) = params.status_to.as_ref().and_then(|v| v.to_i32()) {
                    self.params.status_to = Some(status_to);
                }
            }
            Some(EventType::WorkingStatusTimeout) => {
                if let Some(status) = params.status.as_ref().and_then(|v| v.to_i32()) {
                    self.params.status = Some(status);
                }
                if let Some(hours) = params.timeout_hours.as_ref().and_then(|v| v.to_i32()) {
                    self.params.timeout_hours = Some(hours);
                }
            }
            None => {}
        }
    }

    fn into_save(self, brand_id: i64) -> Result<SaveCreatorScript, AppError> {
        let event_type_id = self
            .event_type_id
            .ok_or_else(|| AppError::BadRequest("The event type is required".into()))?;
        let action_type_id = self
            .action_type_id
            .ok_or_else(|| AppError::BadRequest("The action type is required".into()))?;

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => ScriptNamer::auto_pick_name(event_type_id, action_type_id, &self.params),
        };

        Ok(SaveCreatorScript {
            id: self.id,
            brand_id,
            name,
            event_type_id,
            action_type_id,
            fire_limit_per_creator: self.fire_limit_per_creator,
            is_enabled: self.is_enabled,
            params: self.params,
        })
    }
}
