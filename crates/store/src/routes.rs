//! Collection routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;
use tracing::{info, instrument};
use zia_mia_core::ItemType;

use crate::collections::Object;
use crate::error::ApiError;
use crate::state::StoreState;

/// Build the collection router.
pub fn routes() -> Router<StoreState> {
    Router::new()
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", get(show).put(replace).delete(remove))
}

fn collection(raw: &str) -> Result<ItemType, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn record_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn object(body: Value) -> Result<Object, ApiError> {
    match body {
        Value::Object(object) => Ok(object),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

#[instrument(skip(state))]
async fn list(
    State(state): State<StoreState>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<Object>>, ApiError> {
    let item_type = collection(&raw)?;
    Ok(Json(state.collections().read().await.list(item_type)))
}

#[instrument(skip(state))]
async fn show(
    State(state): State<StoreState>,
    Path((raw, id)): Path<(String, String)>,
) -> Result<Json<Object>, ApiError> {
    let item_type = collection(&raw)?;
    let id = record_id(&id)?;
    state
        .collections()
        .read()
        .await
        .get(item_type, id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state, body))]
async fn create(
    State(state): State<StoreState>,
    Path(raw): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Object>), ApiError> {
    let item_type = collection(&raw)?;
    let fields = object(body)?;
    let created = state
        .collections()
        .write()
        .await
        .insert(item_type, fields)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    info!(collection = %item_type, id = ?created.get("id"), "record created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, body))]
async fn replace(
    State(state): State<StoreState>,
    Path((raw, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Object>, ApiError> {
    let item_type = collection(&raw)?;
    let id = record_id(&id)?;
    let fields = object(body)?;
    let replaced = state
        .collections()
        .write()
        .await
        .replace(item_type, id, fields)
        .ok_or(ApiError::NotFound)?;
    info!(collection = %item_type, id, "record replaced");
    Ok(Json(replaced))
}

#[instrument(skip(state))]
async fn remove(
    State(state): State<StoreState>,
    Path((raw, id)): Path<(String, String)>,
) -> Result<Json<Object>, ApiError> {
    let item_type = collection(&raw)?;
    let id = record_id(&id)?;
    if !state.collections().write().await.remove(item_type, id) {
        return Err(ApiError::NotFound);
    }
    info!(collection = %item_type, id, "record deleted");
    Ok(Json(Object::new()))
}
