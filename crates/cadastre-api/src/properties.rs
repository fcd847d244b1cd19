//! Handlers for `/properties` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/properties` | Newest first |
//! | `POST`   | `/properties` | Body: [`NewProperty`]; returns 201 + stored row |
//! | `GET`    | `/properties/:id` | 404 if not found |
//! | `PUT`    | `/properties/:id` | Full replacement; 404 if not found |
//! | `DELETE` | `/properties/:id` | 204; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use cadastre_core::{
  property::{NewProperty, Property},
  store::CadastreStore,
};

use crate::{
  error::ApiError,
  extract::{Path, Payload},
};

/// `GET /properties`, newest first.
pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Property>>, ApiError> {
  let rows = store.list_properties().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `POST /properties`
pub async fn create<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<NewProperty>,
) -> Result<impl IntoResponse, ApiError> {
  let row = store.create_property(body).await.map_err(ApiError::store)?;
  tracing::debug!(id = row.id, "property created");
  Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /properties/:id`
pub async fn get_one<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Property>, ApiError> {
  let row = store
    .get_property(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("property", id))?;
  Ok(Json(row))
}

/// `PUT /properties/:id`
pub async fn update<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Payload(body): Payload<NewProperty>,
) -> Result<Json<Property>, ApiError> {
  let row = store
    .update_property(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("property", id))?;
  Ok(Json(row))
}

/// `DELETE /properties/:id`
pub async fn delete<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if !store.delete_property(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("property", id));
  }
  tracing::debug!(id, "property deleted");
  Ok(StatusCode::NO_CONTENT)
}
