use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ServiceError;

/// Rejects strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Runs the derived validator rules on a request body.
pub(crate) fn validated<T: Validate>(body: T) -> Result<T, ServiceError> {
    body.validate().map_err(into_service_error)?;
    Ok(body)
}

/// Unwraps a field already checked by `#[validate(required)]`.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| invalid(field, format!("{} is required", field)))
}

/// Validation failure for a single field.
pub(crate) fn invalid(field: &str, message: impl Into<String>) -> ServiceError {
    let message = message.into();
    ServiceError::Validation {
        message: message.clone(),
        fields: BTreeMap::from([(field.to_string(), message)]),
    }
}

fn into_service_error(errors: ValidationErrors) -> ServiceError {
    let fields: BTreeMap<String, String> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, err.code));
                (field.to_string(), message)
            })
        })
        .collect();

    let message = match fields.len() {
        1 => fields.values().next().cloned().unwrap_or_default(),
        n => format!("request has {} invalid fields", n),
    };
    ServiceError::Validation { message, fields }
}
