//! Validation Utilities

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::FieldError;
use super::input::{Flag, Numeric};

/// Flatten nested validation errors into dotted-path field errors.
///
/// `email.subject` style paths are produced for nested structs and
/// `items.0.name` style paths for lists. The result is sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = Vec::new();
    collect(errors, "", &mut collected);
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = format!("{}{}", prefix, field);
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} is invalid.", path)),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect(nested, &format!("{}.", path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}.{}.", path, index), out);
                }
            }
        }
    }
}

/// Accepts integers, decimals and numeric strings that fit an `i32` column.
pub fn validate_numeric(value: &Numeric) -> Result<(), ValidationError> {
    if value.as_f64().is_none() {
        return Err(ValidationError::new("numeric").with_message(Cow::from("The value must be a number.")));
    }
    if value.to_i32().is_none() {
        return Err(ValidationError::new("between").with_message(Cow::from(format!(
            "The value must be between {} and {}.",
            i32::MIN,
            i32::MAX
        ))));
    }
    Ok(())
}

/// Accepts true, false, 1, 0, "1", "0", "true" and "false".
pub fn validate_boolean(value: &Flag) -> Result<(), ValidationError> {
    if value.as_bool().is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("boolean")
            .with_message(Cow::from("The value must be true or false.")))
    }
}
