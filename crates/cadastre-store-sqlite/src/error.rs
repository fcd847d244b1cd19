//! Error type for `cadastre-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("geometry encoding error: {0}")]
  Geometry(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  /// Whether the failure means the database itself is unreachable, as
  /// opposed to a statement being rejected.
  pub fn is_connectivity(&self) -> bool {
    match self {
      Self::Database(
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_),
      ) => true,
      Self::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))) => {
        matches!(
          f.code,
          ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
        )
      }
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
