//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use cadastre_core::Error;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ApiError {
  /// Wrap a backend error, classifying it through the backend's conversion.
  pub fn store<E: Into<Error>>(e: E) -> Self { Self(e.into()) }

  pub fn not_found(resource: &'static str, id: i64) -> Self {
    Self(Error::NotFound { resource, id })
  }
}

/// The single mapping from error tag to HTTP status.
pub fn status_for(e: &Error) -> StatusCode {
  match e {
    Error::Validation(_) => StatusCode::BAD_REQUEST,
    Error::NotFound { .. } => StatusCode::NOT_FOUND,
    Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    Error::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = status_for(&self.0);
    let message = match &self.0 {
      Error::Validation(m) => m.clone(),
      Error::NotFound { .. } => self.0.to_string(),
      Error::Persistence(_) => {
        tracing::error!(error = ?self.0, "store operation failed");
        "Internal server error".to_owned()
      }
      Error::Connectivity(_) => {
        tracing::error!(error = ?self.0, "store unavailable");
        "Database connection failed".to_owned()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
