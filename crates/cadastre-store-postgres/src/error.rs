//! Error type for `cadastre-store-postgres`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("geometry encoding error: {0}")]
  Geometry(#[from] serde_json::Error),
}

impl Error {
  /// Whether the failure means the server is unreachable or the pool is
  /// exhausted, as opposed to a statement being rejected.
  pub fn is_connectivity(&self) -> bool {
    let Self::Database(e) = self else { return false };
    match e {
      sqlx::Error::PoolTimedOut
      | sqlx::Error::PoolClosed
      | sqlx::Error::WorkerCrashed
      | sqlx::Error::Io(_)
      | sqlx::Error::Tls(_) => true,
      // SQLSTATE class 08 is "connection exception"; 57P0x are server
      // shutdown/crash notices; 53300 is too_many_connections.
      sqlx::Error::Database(db) => db.code().is_some_and(|code| {
        code.starts_with("08") || code.starts_with("57P0") || code == "53300"
      }),
      _ => false,
    }
  }
}

impl From<Error> for cadastre_core::Error {
  fn from(e: Error) -> Self {
    if e.is_connectivity() {
      Self::connectivity(e)
    } else {
      Self::persistence(e)
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
