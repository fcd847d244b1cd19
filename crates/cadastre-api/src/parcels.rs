//! Read-only handlers for the imported parcels layer.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/preci-parcels` | Ordered by id; `geometry` is GeoJSON or null |
//! | `GET`  | `/preci-parcels/:id` | 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State};
use cadastre_core::{parcel::Parcel, store::CadastreStore};

use crate::{error::ApiError, extract::Path};

/// `GET /preci-parcels`
pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Parcel>>, ApiError> {
  let parcels = store.list_parcels().await.map_err(ApiError::store)?;
  Ok(Json(parcels))
}

/// `GET /preci-parcels/:id`
pub async fn get_one<S: CadastreStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Parcel>, ApiError> {
  let parcel = store
    .get_parcel(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("parcel", id))?;
  Ok(Json(parcel))
}
