//! JSON REST API for the cadastre store.
//!
//! Exposes an axum [`Router`] backed by any
//! [`cadastre_core::store::CadastreStore`]. CORS, TLS and request tracing are
//! layered on by the caller.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = cadastre_api::router(Arc::new(store));
//! ```

pub mod claims;
pub mod error;
pub mod extract;
pub mod health;
pub mod mines;
pub mod owners;
pub mod parcels;
pub mod properties;
pub mod tables;

use std::sync::Arc;

use axum::{Router, routing::get};
use cadastre_core::store::CadastreStore;

pub use error::ApiError;
pub use extract::Payload;

/// The resource routes, without the `/api` prefix.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CadastreStore + 'static,
{
  Router::new()
    // Owners
    .route("/owners", get(owners::list::<S>).post(owners::create::<S>))
    .route(
      "/owners/{id}",
      get(owners::get_one::<S>).put(owners::update::<S>).delete(owners::delete::<S>),
    )
    // Mining claims
    .route("/mining-claims", get(claims::list::<S>).post(claims::create::<S>))
    .route(
      "/mining-claims/{id}",
      get(claims::get_one::<S>).put(claims::update::<S>).delete(claims::delete::<S>),
    )
    // Mines
    .route("/mines", get(mines::list::<S>).post(mines::create::<S>))
    .route(
      "/mines/{id}",
      get(mines::get_one::<S>).put(mines::update::<S>).delete(mines::delete::<S>),
    )
    // Properties
    .route("/properties", get(properties::list::<S>).post(properties::create::<S>))
    .route(
      "/properties/{id}",
      get(properties::get_one::<S>)
        .put(properties::update::<S>)
        .delete(properties::delete::<S>),
    )
    // Parcels
    .route("/preci-parcels", get(parcels::list::<S>))
    .route("/preci-parcels/{id}", get(parcels::get_one::<S>))
    // Diagnostics
    .route("/tables", get(tables::list::<S>))
    .with_state(store)
}

/// The full application: `/health` plus [`api_router`] under `/api`.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: CadastreStore + 'static,
{
  Router::new()
    .route("/health", get(health::check::<S>))
    .with_state(store.clone())
    .nest("/api", api_router(store))
}
