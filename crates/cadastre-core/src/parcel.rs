//! Surveyed land parcels, imported from an external GIS layer.
//!
//! Parcels are read-only through this system.

use serde::{Deserialize, Serialize};

use crate::Geometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
  pub id:           i64,
  pub house_number: Option<String>,
  pub landuse:      Option<String>,
  pub address:      Option<String>,
  /// Survey identifier referenced by [`Property::parcel_id`](crate::property::Property).
  pub parcel_id:    Option<String>,
  pub geometry:     Option<Geometry>,
}
