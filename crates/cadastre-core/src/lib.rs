//! Core types and trait definitions for the cadastre store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage adapters and the API crate depend on it; it depends on nothing
//! proprietary.

pub mod claim;
pub mod error;
pub mod geometry;
pub mod mine;
pub mod owner;
pub mod parcel;
pub mod property;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use geometry::Geometry;
pub use validate::Validate;
