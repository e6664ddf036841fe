//! Request DTOs
//!
//! Data structures for admin request bodies and query strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::{EmailContentPatch, Recipient};
use crate::shared::error::FieldError;
use crate::shared::input::{double_option, Flag, Numeric};
use crate::shared::validation::{field_errors, validate_boolean, validate_numeric};

const MAX_SHORT_TEXT: usize = 255;

/// JSON shapes a form key may hold. `null` passes every shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Text,
    Numeric,
    Boolean,
    Object,
}

impl Shape {
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Shape::Text, Value::String(_)) => true,
            (Shape::Numeric, Value::Number(_) | Value::String(_)) => true,
            (Shape::Boolean, Value::Bool(_) | Value::Number(_) | Value::String(_)) => true,
            (Shape::Object, Value::Object(_)) => true,
            _ => false,
        }
    }

    fn message(self, path: &str) -> String {
        let attribute = path.replace(['.', '_'], " ");
        match self {
            Shape::Text => format!("The {} must be a string.", attribute),
            Shape::Numeric => format!("The {} must be a number.", attribute),
            Shape::Boolean => format!("The {} field must be true or false.", attribute),
            Shape::Object => format!("The {} must be an object.", attribute),
        }
    }
}

const SCRIPT_SHAPES: [(&str, Shape); 7] = [
    ("name", Shape::Text),
    ("event_type_id", Shape::Numeric),
    ("action_type_id", Shape::Numeric),
    ("fire_limit_per_creator", Shape::Numeric),
    ("is_enabled", Shape::Boolean),
    ("params", Shape::Object),
    ("email", Shape::Object),
];

const PARAMS_SHAPES: [(&str, Shape); 4] = [
    ("recipient", Shape::Text),
    ("status_to", Shape::Numeric),
    ("status", Shape::Numeric),
    ("timeout_hours", Shape::Numeric),
];

const EMAIL_SHAPES: [(&str, Shape); 2] = [("subject", Shape::Text), ("text", Shape::Text)];

/// Drop keys whose JSON type does not match, recording one error per key.
fn retain_shapes(
    fields: &mut Map<String, Value>,
    shapes: &[(&str, Shape)],
    prefix: &str,
    errors: &mut Vec<FieldError>,
) {
    for (key, shape) in shapes {
        if fields.get(*key).is_some_and(|value| !shape.accepts(value)) {
            fields.remove(*key);
            let path = format!("{}{}", prefix, key);
            errors.push(FieldError::new(path.clone(), shape.message(&path)));
        }
    }
}

/// Store/patch body of a creator script.
///
/// Every key is optional. Keys that are absent are left untouched on
/// update, `null` is only meaningful for the nullable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpsertCreatorScriptRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub event_type_id: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub action_type_id: Option<Numeric>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub fire_limit_per_creator: Option<Option<Numeric>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_boolean"))]
    pub is_enabled: Option<Flag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub params: Option<ParamsInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub email: Option<EmailInput>,

    /// Form bookkeeping, never persisted
    #[serde(default, rename = "_form", skip_serializing)]
    pub form: Option<FormMeta>,
}

/// The `params` object of a script form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParamsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub status_to: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub status: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_numeric"))]
    pub timeout_hours: Option<Numeric>,
}

/// The `email` object of a script form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmailInput {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "The email subject may not be greater than 255 characters."))]
    pub subject: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub text: Option<Option<String>>,
}

/// `_form` metadata posted along with admin forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormMeta {
    #[serde(default)]
    pub back_url: Option<String>,
}

impl UpsertCreatorScriptRequest {
    /// Read a submitted form body.
    ///
    /// Keys holding the wrong JSON type are reported as field errors and
    /// left out of the request, so they never abort the form flow.
    pub fn from_body(body: Value) -> (Self, Vec<FieldError>) {
        let Value::Object(mut fields) = body else {
            return (
                Self::default(),
                vec![FieldError::new("input", "The input must be an object.")],
            );
        };

        let mut errors = Vec::new();
        retain_shapes(&mut fields, &SCRIPT_SHAPES, "", &mut errors);
        if let Some(Value::Object(params)) = fields.get_mut("params") {
            retain_shapes(params, &PARAMS_SHAPES, "params.", &mut errors);
        }
        if let Some(Value::Object(email)) = fields.get_mut("email") {
            retain_shapes(email, &EMAIL_SHAPES, "email.", &mut errors);
        }
        if fields
            .get("_form")
            .is_some_and(|form| !matches!(form, Value::Object(_) | Value::Null))
        {
            fields.remove("_form");
        }
        if let Some(Value::Object(form)) = fields.get_mut("_form") {
            if form.get("back_url").is_some_and(|url| !url.is_string()) {
                form.remove("back_url");
            }
        }

        match serde_json::from_value(Value::Object(fields)) {
            Ok(request) => (request, errors),
            Err(e) => {
                errors.push(FieldError::new("input", e.to_string()));
                (Self::default(), errors)
            }
        }
    }

    /// The body as submitted, without form bookkeeping, for the form to
    /// refill itself after a failure.
    pub fn old_input(body: &Value) -> Value {
        match body {
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != "_form")
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Non-empty `_form.back_url`.
    pub fn back_url(&self) -> Option<&str> {
        self.form
            .as_ref()
            .and_then(|f| f.back_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Replace the submitted recipient with `recipient`.
    ///
    /// This also makes `params` present, so the params merge always runs
    /// on update.
    pub fn force_recipient(&mut self, recipient: Option<String>) {
        self.params.get_or_insert_with(ParamsInput::default).recipient = recipient;
    }

    pub fn recipient(&self) -> Option<&str> {
        self.params.as_ref().and_then(|p| p.recipient.as_deref())
    }

    /// Run the field rules. Emails to `la_admin` accept a `null` subject
    /// and text, but both are then capped at 255 characters.
    pub fn validate_for_recipient(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        if let Some(email) = &self.email {
            let relaxed = self.recipient().and_then(Recipient::parse) == Some(Recipient::LaAdmin);
            if relaxed {
                if let Some(Some(text)) = &email.text {
                    if text.chars().count() > MAX_SHORT_TEXT {
                        errors.push(FieldError::new(
                            "email.text",
                            "The email text may not be greater than 255 characters.",
                        ));
                    }
                }
            } else {
                if matches!(email.subject, Some(None)) {
                    errors.push(FieldError::new("email.subject", "The email subject must be a string."));
                }
                if matches!(email.text, Some(None)) {
                    errors.push(FieldError::new("email.text", "The email text must be a string."));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(errors)
        }
    }

    /// Email template changes, if the form carried an `email` object.
    ///
    /// A new script always gets a text, empty when none was submitted.
    pub fn email_patch(&self, creating: bool) -> Option<EmailContentPatch> {
        self.email.as_ref().map(|email| {
            let text = match &email.text {
                Some(Some(text)) => Some(Some(text.clone())),
                _ if creating => Some(Some(String::new())),
                other => other.clone(),
            };
            EmailContentPatch {
                subject: email.subject.clone(),
                text,
            }
        })
    }

}

/// Body of the web-triggered performance snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub ids: Option<SnapshotIds>,
}

/// Brand ids as a comma separated string or a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SnapshotIds {
    Text(String),
    List(Vec<Value>),
}

/// Query string of the delete route.
///
/// Delete forms post `_form[back_url]` like the other admin forms; a bare
/// `back_url` is accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestroyQuery {
    #[serde(default, rename = "_form[back_url]", alias = "_form.back_url")]
    pub form_back_url: Option<String>,

    #[serde(default)]
    pub back_url: Option<String>,
}

impl DestroyQuery {
    pub fn back_url(&self) -> Option<&str> {
        [&self.form_back_url, &self.back_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}
