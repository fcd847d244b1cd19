//! Licensed mines.
//!
//! The backing table comes from a shapefile import and keeps its historical
//! column names (`"Mine Name"`, `"Ristrictns"`, ...). Those names stay inside
//! the adapters; this type uses plain snake_case.

use serde::{Deserialize, Serialize};

use crate::{
  Geometry, Result,
  validate::{Validate, optional_geometry, require},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mine {
  pub id:           i64,
  pub name:         String,
  pub mineral:      Option<String>,
  pub area:         Option<String>,
  pub district:     Option<String>,
  pub licence_no:   Option<String>,
  pub mine_no:      Option<String>,
  pub rights:       Option<String>,
  pub restrictions: Option<String>,
  pub geometry:     Option<Geometry>,
}

/// Body accepted by mine create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMine {
  #[serde(alias = "mineName")]
  pub name:         String,
  #[serde(default)]
  pub mineral:      Option<String>,
  #[serde(default)]
  pub area:         Option<String>,
  #[serde(default)]
  pub district:     Option<String>,
  #[serde(default, alias = "licenceNo")]
  pub licence_no:   Option<String>,
  #[serde(default, alias = "mineNo")]
  pub mine_no:      Option<String>,
  #[serde(default)]
  pub rights:       Option<String>,
  #[serde(default)]
  pub restrictions: Option<String>,
  #[serde(default)]
  pub geometry:     Option<Geometry>,
}

impl NewMine {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name:         name.into(),
      mineral:      None,
      area:         None,
      district:     None,
      licence_no:   None,
      mine_no:      None,
      rights:       None,
      restrictions: None,
      geometry:     None,
    }
  }
}

impl Validate for NewMine {
  fn validate(&self) -> Result<()> {
    require("mine", "name", &self.name)?;
    optional_geometry(self.geometry.as_ref())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn legacy_mine_name_alias() {
    let m: NewMine =
      serde_json::from_str(r#"{"mineName":"Renco","licenceNo":"L-17","mineNo":"M-3"}"#).unwrap();
    assert_eq!(m.name, "Renco");
    assert_eq!(m.licence_no.as_deref(), Some("L-17"));
    assert_eq!(m.mine_no.as_deref(), Some("M-3"));
  }

  #[test]
  fn empty_name_rejected() { assert!(NewMine::named("").validate().is_err()); }
}
