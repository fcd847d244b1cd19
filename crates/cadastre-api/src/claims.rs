//! Handlers for `/mining-claims` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/mining-claims` | Ordered by id; `geometry` is GeoJSON or null |
//! | `POST`   | `/mining-claims` | Body: [`NewMiningClaim`]; returns 201 + stored row |
//! | `GET`    | `/mining-claims/:id` | 404 if not found |
//! | `PUT`    | `/mining-claims/:id` | Full replacement; 404 if not found |
//! | `DELETE` | `/mining-claims/:id` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use cadastre_core::{
  claim::{MiningClaim, NewMiningClaim},
  store::CadastreStore,
};

use crate::{
  error::ApiError,
  extract::{Path, Payload},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /mining-claims`
pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<MiningClaim>>, ApiError> {
  let rows = store.list_claims().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /mining-claims`
pub async fn create<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<NewMiningClaim>,
) -> Result<impl IntoResponse, ApiError> {
  let row = store.create_claim(body).await.map_err(ApiError::store)?;
  tracing::debug!(id = row.id, "mining claim created");
  Ok((StatusCode::CREATED, Json(row)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /mining-claims/:id`
pub async fn get_one<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<MiningClaim>, ApiError> {
  let row = store
    .get_claim(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("mining claim", id))?;
  Ok(Json(row))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /mining-claims/:id`
pub async fn update<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Payload(body): Payload<NewMiningClaim>,
) -> Result<Json<MiningClaim>, ApiError> {
  let row = store
    .update_claim(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("mining claim", id))?;
  Ok(Json(row))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /mining-claims/:id`
pub async fn delete<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !store.delete_claim(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("mining claim", id));
  }
  tracing::debug!(id, "mining claim deleted");
  Ok(StatusCode::NO_CONTENT)
}
