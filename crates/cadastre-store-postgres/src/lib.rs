//! PostGIS backend for the cadastre store.
//!
//! Wraps a [`sqlx::PgPool`]. Every store operation is one parameterized
//! statement run through the pool; geometry crosses the boundary as GeoJSON
//! via `ST_GeomFromGeoJSON` / `ST_AsGeoJSON`.

mod rows;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use store::PgStore;

#[cfg(test)]
mod tests;
