//! Registered mining claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Geometry, Result,
  validate::{Validate, optional_geometry, require},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningClaim {
  pub id:           i64,
  pub claim_number: String,
  pub claim_type:   Option<String>,
  pub status:       Option<String>,
  pub holder:       Option<String>,
  pub geometry:     Option<Geometry>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Body accepted by claim create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMiningClaim {
  #[serde(alias = "claimNumber")]
  pub claim_number: String,
  #[serde(default, alias = "claimType")]
  pub claim_type:   Option<String>,
  #[serde(default)]
  pub status:       Option<String>,
  #[serde(default)]
  pub holder:       Option<String>,
  #[serde(default)]
  pub geometry:     Option<Geometry>,
}

impl NewMiningClaim {
  pub fn numbered(claim_number: impl Into<String>) -> Self {
    Self {
      claim_number: claim_number.into(),
      claim_type:   None,
      status:       None,
      holder:       None,
      geometry:     None,
    }
  }
}

impl Validate for NewMiningClaim {
  fn validate(&self) -> Result<()> {
    require("mining claim", "claim_number", &self.claim_number)?;
    optional_geometry(self.geometry.as_ref())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn camel_case_body_from_web_client() {
    let body = r#"{
      "claimNumber": "MC-0042",
      "claimType": "gold",
      "status": "active",
      "holder": "Acme Ltd",
      "geometry": {"type": "Point", "coordinates": [30.8, -20.1]}
    }"#;
    let claim: NewMiningClaim = serde_json::from_str(body).unwrap();
    assert_eq!(claim.claim_number, "MC-0042");
    assert_eq!(claim.claim_type.as_deref(), Some("gold"));
    assert!(claim.validate().is_ok());
  }

  #[test]
  fn invalid_geometry_fails_validation() {
    let claim = NewMiningClaim {
      claim_number: "MC-1".into(),
      claim_type:   None,
      status:       None,
      holder:       None,
      geometry:     Some(Geometry::Point { coordinates: vec![f64::NAN, 1.0] }),
    };
    assert!(claim.validate().is_err());
  }
}
