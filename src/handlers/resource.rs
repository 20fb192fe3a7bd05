//! The generic CRUD handler set. One implementation serves every resource
//! family; the `ResourceSpec` descriptor supplies field schema, message nouns
//! and storage binding, so the three wirings differ only by descriptor.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tracing::error;

use crate::error::ApiError;
use crate::middleware::bearer_auth;
use crate::model::ResourceSpec;
use crate::store::{ResourceStore, StoreError};
use crate::validate;

/// Descriptor plus injected store handle; the state for one resource's routes.
#[derive(Clone)]
pub struct ResourceHandler {
    pub spec: &'static ResourceSpec,
    pub store: Arc<dyn ResourceStore>,
}

impl ResourceHandler {
    pub fn new(spec: &'static ResourceSpec, store: Arc<dyn ResourceStore>) -> Self {
        Self { spec, store }
    }
}

/// Route table for one resource family rooted at `path`. Reads are public;
/// create/update/delete carry the bearer-auth layer, so an invalid credential
/// rejects the request before any other processing.
pub fn routes(path: &str, handler: ResourceHandler) -> Router {
    let auth = axum::middleware::from_fn(bearer_auth);

    Router::new()
        .route(path, get(list).post(create.layer(auth.clone())))
        .route(
            &format!("{}/:id", path),
            get(get_by_id)
                .patch(update.layer(auth.clone()))
                .delete(delete_by_id.layer(auth)),
        )
        .with_state(handler)
}

/// GET /<resources> - full collection, exactly as stored
async fn list(State(h): State<ResourceHandler>) -> Result<Json<Vec<Value>>, ApiError> {
    let rows = h.store.find_many().await.map_err(|err| {
        error!(resource = h.spec.noun, error = %err, "find_many failed");
        ApiError::internal(format!("Failed to fetch {}", h.spec.plural))
    })?;
    Ok(Json(rows))
}

/// GET /<resources>/:id
async fn get_by_id(
    State(h): State<ResourceHandler>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match h.store.find_by_id(id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err(ApiError::not_found(format!("{} not found", h.spec.display))),
        Err(err) => {
            error!(resource = h.spec.noun, id, error = %err, "find_by_id failed");
            Err(ApiError::internal(format!(
                "Failed to fetch {}",
                h.spec.noun
            )))
        }
    }
}

/// POST /<resources> - validated draft handed to the store, 201 with the
/// created entity (store-assigned id included)
async fn create(
    State(h): State<ResourceHandler>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = validate::create_payload(h.spec, &body)?;

    let created = h.store.create(draft).await.map_err(|err| {
        error!(resource = h.spec.noun, error = %err, "create failed");
        ApiError::internal(format!("Failed to create the {}", h.spec.noun))
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /<resources>/:id - existence check, then partial merge. The two
/// storage calls are not transactional; either one failing reports the same
/// update error since the caller cannot tell them apart.
async fn update(
    State(h): State<ResourceHandler>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = validate::update_payload(h.spec, &body)?;

    let storage_failed = |err: StoreError| {
        error!(resource = h.spec.noun, id, error = %err, "update failed");
        ApiError::internal(format!("Failed to update the {}", h.spec.noun))
    };

    match h.store.find_by_id(id).await.map_err(storage_failed)? {
        Some(_) => {}
        None => return Err(ApiError::not_found(format!("{} not found", h.spec.display))),
    }

    let updated = h.store.update(id, patch).await.map_err(storage_failed)?;
    Ok(Json(updated))
}

/// DELETE /<resources>/:id - straight to the store, no pre-existence check;
/// a missing row is whatever the store makes of it
async fn delete_by_id(
    State(h): State<ResourceHandler>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    h.store.delete(id).await.map_err(|err| {
        error!(resource = h.spec.noun, id, error = %err, "delete failed");
        ApiError::internal(format!("Failed to delete the {}", h.spec.noun))
    })?;
    Ok(StatusCode::NO_CONTENT)
}
