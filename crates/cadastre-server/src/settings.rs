//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then the process environment (which `main` has already seeded from
//! `.env`). Environment keys are the field names upper-cased, with no prefix:
//! `PORT`, `DB_HOST`, `DATABASE_URL`, ...

use std::{path::{Path, PathBuf}, time::Duration};

use cadastre_store_postgres::DatabaseConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                    String,
  pub port:                    u16,
  /// The single browser origin allowed by CORS.
  pub cors_origin:             String,
  pub db_host:                 String,
  pub db_port:                 u16,
  pub db_user:                 String,
  pub db_password:             String,
  pub db_name:                 String,
  /// Overrides the discrete `db_*` connection fields when set.
  pub database_url:            Option<String>,
  pub db_max_connections:      u32,
  pub db_idle_timeout_secs:    u64,
  pub db_acquire_timeout_secs: u64,
  pub parcels_table:           String,
  /// Serve from a SQLite file instead of PostGIS.
  pub sqlite_path:             Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let db = DatabaseConfig::default();
    Self {
      host:                    "0.0.0.0".to_owned(),
      port:                    3002,
      cors_origin:             "http://localhost:5173".to_owned(),
      db_host:                 db.host,
      db_port:                 db.port,
      db_user:                 db.user,
      db_password:             db.password,
      db_name:                 db.database,
      database_url:            None,
      db_max_connections:      db.max_connections,
      db_idle_timeout_secs:    db.idle_timeout.as_secs(),
      db_acquire_timeout_secs: db.acquire_timeout.as_secs(),
      parcels_table:           db.parcels_table,
      sqlite_path:             None,
    }
  }
}

impl ServerConfig {
  /// Load from `file` (if given) and the process environment.
  pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
    Self::load_with(file, None)
  }

  fn load_with(
    file: Option<&Path>,
    env: Option<config::Map<String, String>>,
  ) -> Result<Self, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(File::from(path));
    }
    builder
      .add_source(Environment::default().try_parsing(true).source(env))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn to_database_config(&self) -> DatabaseConfig {
    DatabaseConfig {
      host:            self.db_host.clone(),
      port:            self.db_port,
      user:            self.db_user.clone(),
      password:        self.db_password.clone(),
      database:        self.db_name.clone(),
      url:             self.database_url.clone().filter(|u| !u.trim().is_empty()),
      max_connections: self.db_max_connections,
      idle_timeout:    Duration::from_secs(self.db_idle_timeout_secs),
      acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
      parcels_table:   self.parcels_table.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
  }

  #[test]
  fn defaults_without_any_source() {
    let cfg = ServerConfig::load_with(None, env(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "0.0.0.0:3002");
    assert_eq!(cfg.cors_origin, "http://localhost:5173");
    assert!(cfg.sqlite_path.is_none());
  }

  #[test]
  fn environment_overrides_defaults() {
    let cfg = ServerConfig::load_with(
      None,
      env(&[("PORT", "8080"), ("DB_HOST", "db.internal"), ("DB_MAX_CONNECTIONS", "4")]),
    )
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.db_host, "db.internal");
    assert_eq!(cfg.db_max_connections, 4);
    assert_eq!(cfg.db_name, "cada_engine");
  }

  #[test]
  fn environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "port = 4000\nparcels_table = \"parcels_2019\"\ndb_user = \"surveyor\"").unwrap();

    let cfg = ServerConfig::load_with(Some(file.path()), env(&[("DB_USER", "auditor")])).unwrap();
    assert_eq!(cfg.port, 4000);
    assert_eq!(cfg.parcels_table, "parcels_2019");
    assert_eq!(cfg.db_user, "auditor");
  }

  #[test]
  fn missing_file_is_an_error() {
    let err = ServerConfig::load_with(Some(Path::new("/nonexistent/cadastre.toml")), env(&[]));
    assert!(err.is_err());
  }

  #[test]
  fn database_config_carries_pool_bounds() {
    let cfg = ServerConfig {
      db_idle_timeout_secs: 10,
      db_acquire_timeout_secs: 2,
      database_url: Some("  ".to_owned()),
      ..ServerConfig::default()
    };
    let db = cfg.to_database_config();
    assert_eq!(db.idle_timeout, Duration::from_secs(10));
    assert_eq!(db.acquire_timeout, Duration::from_secs(2));
    assert_eq!(db.max_connections, 20);
    assert!(db.url.is_none());
  }
}
