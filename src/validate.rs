//! Payload checks run before any storage call. Create requires every
//! mandatory field; update accepts any non-empty subset of declared fields.
//! Violations stop the request with a 400 carrying per-field detail.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::model::{FieldKind, FieldSpec, ResourceSpec};

/// Validate a create body, returning the field map handed to the store.
pub fn create_payload(spec: &ResourceSpec, body: &Value) -> Result<Map<String, Value>, ApiError> {
    let object = as_object(body)?;
    let mut field_errors = HashMap::new();
    let mut draft = Map::new();

    for field in spec.fields {
        match object.get(field.name) {
            Some(value) => match check_kind(field, value) {
                Ok(()) => {
                    draft.insert(field.name.to_string(), value.clone());
                }
                Err(detail) => {
                    field_errors.insert(field.name.to_string(), detail);
                }
            },
            None if field.required => {
                field_errors.insert(
                    field.name.to_string(),
                    "This field is required".to_string(),
                );
            }
            None => {}
        }
    }

    collect_unknown(spec, object, &mut field_errors);

    if field_errors.is_empty() {
        Ok(draft)
    } else {
        Err(invalid(spec, field_errors))
    }
}

/// Validate a partial-update body. Unspecified fields stay untouched in
/// storage; an empty patch is rejected since there is nothing to apply.
pub fn update_payload(spec: &ResourceSpec, body: &Value) -> Result<Map<String, Value>, ApiError> {
    let object = as_object(body)?;
    let mut field_errors = HashMap::new();
    let mut patch = Map::new();

    for field in spec.fields {
        if let Some(value) = object.get(field.name) {
            match check_kind(field, value) {
                Ok(()) => {
                    patch.insert(field.name.to_string(), value.clone());
                }
                Err(detail) => {
                    field_errors.insert(field.name.to_string(), detail);
                }
            }
        }
    }

    collect_unknown(spec, object, &mut field_errors);

    if !field_errors.is_empty() {
        return Err(invalid(spec, field_errors));
    }
    if patch.is_empty() {
        return Err(ApiError::bad_request(
            "Request body must include at least one field",
        ));
    }
    Ok(patch)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))
}

fn check_kind(field: &FieldSpec, value: &Value) -> Result<(), String> {
    match field.kind {
        FieldKind::Text => match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            _ => Err("must be a non-empty string".to_string()),
        },
        FieldKind::Int => match value.as_i64() {
            Some(_) => Ok(()),
            None => Err("must be an integer".to_string()),
        },
        FieldKind::Ref => match value.as_i64() {
            Some(id) if id > 0 => Ok(()),
            _ => Err("must be a valid identifier".to_string()),
        },
        FieldKind::Opaque => Ok(()),
    }
}

fn collect_unknown(
    spec: &ResourceSpec,
    object: &Map<String, Value>,
    field_errors: &mut HashMap<String, String>,
) {
    for key in object.keys() {
        if !spec.fields.iter().any(|f| f.name == key) {
            field_errors.insert(key.clone(), "Unknown field".to_string());
        }
    }
}

fn invalid(spec: &ResourceSpec, field_errors: HashMap<String, String>) -> ApiError {
    ApiError::validation(format!("Invalid {} payload", spec.noun), field_errors)
}
