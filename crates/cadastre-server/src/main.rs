//! cadastre-server binary.
//!
//! Loads configuration (defaults, optional TOML file, `.env`, environment),
//! opens the store, ensures the schema and the mines spatial index, and serves
//! the JSON API over HTTP until Ctrl-C or SIGTERM.
//!
//! ```text
//! cadastre-server --config cadastre.toml
//! cadastre-server --init-db          # bootstrap the database and exit
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::http::{HeaderValue, Method, header};
use cadastre_core::store::CadastreStore;
use cadastre_store_postgres::PgStore;
use cadastre_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Cadastral records API server")]
struct Cli {
  /// Path to a TOML configuration file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Create the schema and the spatial index, then exit.
  #[arg(long)]
  init_db: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // `.env` never overrides variables already set in the process.
  if let Err(e) = dotenvy::dotenv()
    && !e.not_found()
  {
    tracing::warn!(error = %e, "ignoring unreadable .env file");
  }

  let cfg = ServerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

  match &cfg.sqlite_path {
    Some(path) => {
      // Opening runs the schema and spatial index bootstrap.
      let store = SqliteStore::open(path)
        .await
        .with_context(|| format!("failed to open SQLite store at {path:?}"))?;
      tracing::info!(path = %path.display(), "opened SQLite store");
      run(store, &cfg, cli.init_db).await
    }
    None => {
      let store = PgStore::connect(&cfg.to_database_config())
        .await
        .context("failed to connect to PostgreSQL")?;
      store.migrate().await.context("schema bootstrap failed")?;
      store
        .bootstrap_spatial_index()
        .await
        .context("spatial index bootstrap failed")?;
      run(store, &cfg, cli.init_db).await
    }
  }
}

/// Serve `store` until a shutdown signal arrives, then close it. With
/// `init_only`, close it straight away.
async fn run<S>(store: S, cfg: &ServerConfig, init_only: bool) -> anyhow::Result<()>
where
  S: CadastreStore + 'static,
{
  let store = Arc::new(store);

  if init_only {
    tracing::info!("database initialised");
    store.close().await.context("failed to close store")?;
    return Ok(());
  }

  let origin: HeaderValue = cfg
    .cors_origin
    .parse()
    .with_context(|| format!("invalid cors_origin {:?}", cfg.cors_origin))?;
  let cors = CorsLayer::new()
    .allow_origin(origin)
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers([header::CONTENT_TYPE]);

  let app = cadastre_api::router(store.clone())
    .layer(cors)
    .layer(TraceLayer::new_for_http());

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close().await.context("failed to close store")?;
  tracing::info!("shutdown complete");
  Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut term) => {
        term.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received Ctrl-C, draining connections"),
    () = terminate => tracing::info!("received SIGTERM, draining connections"),
  }
}
