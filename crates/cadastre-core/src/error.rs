//! Error types for `cadastre-core`.
//!
//! Every storage adapter converts its own error type into [`Error`], so the
//! HTTP layer only ever has to translate these four tags.

use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or a value is malformed.
  #[error("validation failed: {0}")]
  Validation(String),

  /// Zero rows were selected or affected.
  #[error("{resource} {id} not found")]
  NotFound { resource: &'static str, id: i64 },

  /// The store rejected or failed to execute a statement.
  #[error("persistence error: {0}")]
  Persistence(#[source] Source),

  /// The store could not be reached, or no pooled connection became
  /// available within the acquisition bound.
  #[error("store unavailable: {0}")]
  Connectivity(#[source] Source),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn persistence(e: impl Into<Source>) -> Self { Self::Persistence(e.into()) }

  pub fn connectivity(e: impl Into<Source>) -> Self { Self::Connectivity(e.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
