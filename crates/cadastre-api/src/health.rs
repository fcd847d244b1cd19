//! `GET /health`: liveness of the process and reachability of the store.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use cadastre_core::store::CadastreStore;
use chrono::Utc;
use serde_json::json;

/// 200 when a trivial store round-trip succeeds, 503 otherwise.
pub async fn check<S: CadastreStore>(State(store): State<Arc<S>>) -> Response {
  let timestamp = Utc::now();
  match store.ping().await {
    Ok(()) => Json(json!({
      "status":    "ok",
      "timestamp": timestamp,
      "database":  "connected",
    }))
    .into_response(),
    Err(e) => {
      let e: cadastre_core::Error = e.into();
      tracing::warn!(error = %e, "health check failed");
      let body = json!({
        "status":    "error",
        "timestamp": timestamp,
        "database":  "disconnected",
        "error":     "Database connection failed",
      });
      (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
  }
}
