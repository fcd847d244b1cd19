//! Boundary validation for inbound payloads.

use crate::{Error, Geometry, Result};

/// Implemented by every input type accepted over the HTTP boundary.
///
/// Validation runs before any store call, so a rejected payload never reaches
/// the persistence layer.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// Reject a required text field that is empty or whitespace only.
pub fn require(resource: &str, field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(format!(
      "missing required {resource} field: {field}"
    )));
  }
  Ok(())
}

/// Validate an optional geometry if one was supplied.
pub fn optional_geometry(geometry: Option<&Geometry>) -> Result<()> {
  geometry.map_or(Ok(()), Geometry::validate)
}
