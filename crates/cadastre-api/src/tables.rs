//! `GET /tables`: names of the user tables the store can see.

use std::sync::Arc;

use axum::{Json, extract::State};
use cadastre_core::store::CadastreStore;

use crate::error::ApiError;

pub async fn list<S: CadastreStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
  let tables = store.list_tables().await.map_err(ApiError::store)?;
  Ok(Json(tables))
}
