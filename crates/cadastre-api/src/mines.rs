//! Handlers for `/mines` endpoints.
//!
//! Same five operations as `/owners`. Bodies and responses use snake_case
//! names; the import's column names never appear on the wire.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use cadastre_core::{
  mine::{NewMine, Mine},
  store::CadastreStore,
};

use crate::{
  error::ApiError,
  extract::{Path, Payload},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /mines`
pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Mine>>, ApiError> {
  let rows = store.list_mines().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /mines`
pub async fn create<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<NewMine>,
) -> Result<impl IntoResponse, ApiError> {
  let row = store.create_mine(body).await.map_err(ApiError::store)?;
  tracing::debug!(id = row.id, "mine created");
  Ok((StatusCode::CREATED, Json(row)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /mines/:id`
pub async fn get_one<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Mine>, ApiError> {
  let row = store
    .get_mine(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("mine", id))?;
  Ok(Json(row))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /mines/:id`
pub async fn update<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Payload(body): Payload<NewMine>,
) -> Result<Json<Mine>, ApiError> {
  let row = store
    .update_mine(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("mine", id))?;
  Ok(Json(row))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /mines/:id`
pub async fn delete<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !store.delete_mine(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("mine", id));
  }
  tracing::debug!(id, "mine deleted");
  Ok(StatusCode::NO_CONTENT)
}
