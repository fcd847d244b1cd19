//! Land and claim owners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, validate::{Validate, require}};

/// A persisted owner row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
  pub id:           i64,
  pub name:         String,
  pub contact_info: Option<String>,
  pub address:      Option<String>,
  pub created_at:   DateTime<Utc>,
  /// Refreshed by the store on every update.
  pub updated_at:   DateTime<Utc>,
}

/// Body accepted by owner create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOwner {
  pub name:         String,
  #[serde(default, alias = "contactInfo")]
  pub contact_info: Option<String>,
  #[serde(default)]
  pub address:      Option<String>,
}

impl NewOwner {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), contact_info: None, address: None }
  }
}

impl Validate for NewOwner {
  fn validate(&self) -> Result<()> { require("owner", "name", &self.name) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn blank_name_is_rejected() {
    let err = NewOwner::named("   ").validate().unwrap_err();
    assert!(matches!(err, Error::Validation(m) if m.contains("name")));
  }

  #[test]
  fn optional_fields_default_to_none() {
    let o: NewOwner = serde_json::from_str(r#"{"name":"Acme Ltd"}"#).unwrap();
    assert_eq!(o, NewOwner::named("Acme Ltd"));
  }

  #[test]
  fn legacy_camel_case_is_accepted() {
    let o: NewOwner =
      serde_json::from_str(r#"{"name":"Acme","contactInfo":"0772 000 000"}"#).unwrap();
    assert_eq!(o.contact_info.as_deref(), Some("0772 000 000"));
  }

  #[test]
  fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<NewOwner>(r#"{"name":"Acme","id":4}"#).is_err());
  }

  #[test]
  fn missing_name_fails_to_parse() {
    assert!(serde_json::from_str::<NewOwner>(r#"{"address":"Masvingo"}"#).is_err());
  }
}
