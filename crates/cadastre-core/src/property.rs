//! Valuations and other measured attributes attached to a parcel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, validate::{Validate, require}};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
  pub id:            i64,
  /// The `parcelId` of the parcel this property belongs to.
  pub parcel_id:     String,
  pub property_type: String,
  pub value:         Option<f64>,
  pub unit:          Option<String>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Body accepted by property create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProperty {
  #[serde(alias = "parcelId")]
  pub parcel_id:     String,
  #[serde(alias = "propertyType")]
  pub property_type: String,
  #[serde(default)]
  pub value:         Option<f64>,
  #[serde(default)]
  pub unit:          Option<String>,
}

impl Validate for NewProperty {
  fn validate(&self) -> Result<()> {
    require("property", "parcel_id", &self.parcel_id)?;
    require("property", "property_type", &self.property_type)
  }
}
