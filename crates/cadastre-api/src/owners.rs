//! Handlers for `/owners` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/owners` | Ordered by id |
//! | `POST`   | `/owners` | Body: [`NewOwner`]; returns 201 + stored row |
//! | `GET`    | `/owners/:id` | 404 if not found |
//! | `PUT`    | `/owners/:id` | Full replacement; 404 if not found |
//! | `DELETE` | `/owners/:id` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use cadastre_core::{
  owner::{NewOwner, Owner},
  store::CadastreStore,
};

use crate::{
  error::ApiError,
  extract::{Path, Payload},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /owners`
pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Owner>>, ApiError> {
  let rows = store.list_owners().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /owners`
pub async fn create<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<NewOwner>,
) -> Result<impl IntoResponse, ApiError> {
  let row = store.create_owner(body).await.map_err(ApiError::store)?;
  tracing::debug!(id = row.id, "owner created");
  Ok((StatusCode::CREATED, Json(row)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /owners/:id`
pub async fn get_one<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Owner>, ApiError> {
  let row = store
    .get_owner(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("owner", id))?;
  Ok(Json(row))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /owners/:id`
pub async fn update<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Payload(body): Payload<NewOwner>,
) -> Result<Json<Owner>, ApiError> {
  let row = store
    .update_owner(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("owner", id))?;
  Ok(Json(row))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /owners/:id`
pub async fn delete<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !store.delete_owner(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("owner", id));
  }
  tracing::debug!(id, "owner deleted");
  Ok(StatusCode::NO_CONTENT)
}
