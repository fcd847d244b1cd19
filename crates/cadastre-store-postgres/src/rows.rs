//! Row types as returned by the SQL in [`crate::store`], and their conversion
//! into domain types. Geometry arrives as `ST_AsGeoJSON` text.

use cadastre_core::{
  Geometry,
  claim::MiningClaim,
  mine::Mine,
  owner::Owner,
  parcel::Parcel,
  property::Property,
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::Result;

fn decode_geometry(text: Option<&str>) -> Result<Option<Geometry>> {
  Ok(text.map(Geometry::from_geojson).transpose()?)
}

pub fn encode_geometry(geometry: Option<&Geometry>) -> Result<Option<String>> {
  Ok(geometry.map(Geometry::to_geojson).transpose()?)
}

#[derive(Debug, FromRow)]
pub struct OwnerRow {
  pub id:           i64,
  pub name:         String,
  pub contact_info: Option<String>,
  pub address:      Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

impl From<OwnerRow> for Owner {
  fn from(r: OwnerRow) -> Self {
    Self {
      id:           r.id,
      name:         r.name,
      contact_info: r.contact_info,
      address:      r.address,
      created_at:   r.created_at,
      updated_at:   r.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct ClaimRow {
  pub id:           i64,
  pub claim_number: String,
  pub claim_type:   Option<String>,
  pub status:       Option<String>,
  pub holder:       Option<String>,
  pub geometry:     Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

impl ClaimRow {
  pub fn into_claim(self) -> Result<MiningClaim> {
    Ok(MiningClaim {
      id:           self.id,
      claim_number: self.claim_number,
      claim_type:   self.claim_type,
      status:       self.status,
      holder:       self.holder,
      geometry:     decode_geometry(self.geometry.as_deref())?,
      created_at:   self.created_at,
      updated_at:   self.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct MineRow {
  pub id:           i64,
  pub name:         String,
  pub mineral:      Option<String>,
  pub area:         Option<String>,
  pub district:     Option<String>,
  pub licence_no:   Option<String>,
  pub mine_no:      Option<String>,
  pub rights:       Option<String>,
  pub restrictions: Option<String>,
  pub geometry:     Option<String>,
}

impl MineRow {
  pub fn into_mine(self) -> Result<Mine> {
    Ok(Mine {
      id:           self.id,
      name:         self.name,
      mineral:      self.mineral,
      area:         self.area,
      district:     self.district,
      licence_no:   self.licence_no,
      mine_no:      self.mine_no,
      rights:       self.rights,
      restrictions: self.restrictions,
      geometry:     decode_geometry(self.geometry.as_deref())?,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct PropertyRow {
  pub id:            i64,
  pub parcel_id:     String,
  pub property_type: String,
  pub value:         Option<f64>,
  pub unit:          Option<String>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl From<PropertyRow> for Property {
  fn from(r: PropertyRow) -> Self {
    Self {
      id:            r.id,
      parcel_id:     r.parcel_id,
      property_type: r.property_type,
      value:         r.value,
      unit:          r.unit,
      created_at:    r.created_at,
      updated_at:    r.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct ParcelRow {
  pub id:           i64,
  pub house_number: Option<String>,
  pub landuse:      Option<String>,
  pub address:      Option<String>,
  pub parcel_id:    Option<String>,
  pub geometry:     Option<String>,
}

impl ParcelRow {
  pub fn into_parcel(self) -> Result<Parcel> {
    Ok(Parcel {
      id:           self.id,
      house_number: self.house_number,
      landuse:      self.landuse,
      address:      self.address,
      parcel_id:    self.parcel_id,
      geometry:     decode_geometry(self.geometry.as_deref())?,
    })
  }
}
