//! Connection and pool settings.

use std::{str::FromStr, time::Duration};

use sqlx::postgres::PgConnectOptions;

use crate::Result;

/// Everything needed to build the connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
  pub host:            String,
  pub port:            u16,
  pub user:            String,
  pub password:        String,
  pub database:        String,
  /// A full `postgres://` URL. Takes precedence over the discrete fields.
  pub url:             Option<String>,
  /// Upper bound on concurrently open connections.
  pub max_connections: u32,
  /// Idle connections are closed after this long.
  pub idle_timeout:    Duration,
  /// Checking out a connection fails after this long instead of waiting
  /// indefinitely.
  pub acquire_timeout: Duration,
  /// Name of the imported parcels table. Survey imports produce arbitrary
  /// names, so it is always quoted as an identifier.
  pub parcels_table:   String,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      host:            "localhost".to_owned(),
      port:            5432,
      user:            "cada_engine".to_owned(),
      password:        "postgres".to_owned(),
      database:        "cada_engine".to_owned(),
      url:             None,
      max_connections: 20,
      idle_timeout:    Duration::from_secs(30),
      acquire_timeout: Duration::from_secs(5),
      parcels_table:   "preci_parcels".to_owned(),
    }
  }
}

impl DatabaseConfig {
  pub fn connect_options(&self) -> Result<PgConnectOptions> {
    if let Some(url) = &self.url {
      return Ok(PgConnectOptions::from_str(url)?);
    }
    Ok(
      PgConnectOptions::new()
        .host(&self.host)
        .port(self.port)
        .username(&self.user)
        .password(&self.password)
        .database(&self.database),
    )
  }
}

/// Quote `name` as a PostgreSQL identifier.
pub fn quote_ident(name: &str) -> String { format!("\"{}\"", name.replace('"', "\"\"")) }
