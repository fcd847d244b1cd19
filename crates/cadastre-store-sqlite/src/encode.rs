//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings written by SQLite's `strftime`. Geometry is
//! compact GeoJSON text, converted only through the [`Geometry`] boundary
//! functions.

use cadastre_core::{
  Geometry,
  claim::MiningClaim,
  mine::Mine,
  owner::Owner,
  parcel::Parcel,
  property::Property,
};
use chrono::{DateTime, Utc};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Geometry ────────────────────────────────────────────────────────────────

pub fn encode_geometry(g: Option<&Geometry>) -> Result<Option<String>> {
  Ok(g.map(Geometry::to_geojson).transpose()?)
}

pub fn decode_geometry(s: Option<&str>) -> Result<Option<Geometry>> {
  Ok(s.map(Geometry::from_geojson).transpose()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `owners` row.
pub struct RawOwner {
  pub id:           i64,
  pub name:         String,
  pub contact_info: Option<String>,
  pub address:      Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawOwner {
  /// Columns: `id, name, contact_info, address, created_at, updated_at`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      contact_info: row.get(2)?,
      address:      row.get(3)?,
      created_at:   row.get(4)?,
      updated_at:   row.get(5)?,
    })
  }

  pub fn into_owner(self) -> Result<Owner> {
    Ok(Owner {
      id:           self.id,
      name:         self.name,
      contact_info: self.contact_info,
      address:      self.address,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `mining_claims` row.
pub struct RawClaim {
  pub id:           i64,
  pub claim_number: String,
  pub claim_type:   Option<String>,
  pub status:       Option<String>,
  pub holder:       Option<String>,
  pub geometry:     Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawClaim {
  /// Columns: `id, claim_number, claim_type, status, holder, geometry,
  /// created_at, updated_at`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      claim_number: row.get(1)?,
      claim_type:   row.get(2)?,
      status:       row.get(3)?,
      holder:       row.get(4)?,
      geometry:     row.get(5)?,
      created_at:   row.get(6)?,
      updated_at:   row.get(7)?,
    })
  }

  pub fn into_claim(self) -> Result<MiningClaim> {
    Ok(MiningClaim {
      id:           self.id,
      claim_number: self.claim_number,
      claim_type:   self.claim_type,
      status:       self.status,
      holder:       self.holder,
      geometry:     decode_geometry(self.geometry.as_deref())?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `mines` row.
pub struct RawMine {
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

impl RawMine {
  /// Columns: `id, "Mine Name", "Mineral", "Area", "District", "Licence No",
  /// "Mine No", "Rights", "Ristrictns", geom`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      mineral:      row.get(2)?,
      area:         row.get(3)?,
      district:     row.get(4)?,
      licence_no:   row.get(5)?,
      mine_no:      row.get(6)?,
      rights:       row.get(7)?,
      restrictions: row.get(8)?,
      geometry:     row.get(9)?,
    })
  }

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

/// Raw values read directly from a `properties` row.
pub struct RawProperty {
  pub id:            i64,
  pub parcel_id:     String,
  pub property_type: String,
  pub value:         Option<f64>,
  pub unit:          Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawProperty {
  /// Columns: `id, parcel_id, property_type, value, unit, created_at,
  /// updated_at`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      parcel_id:     row.get(1)?,
      property_type: row.get(2)?,
      value:         row.get(3)?,
      unit:          row.get(4)?,
      created_at:    row.get(5)?,
      updated_at:    row.get(6)?,
    })
  }

  pub fn into_property(self) -> Result<Property> {
    Ok(Property {
      id:            self.id,
      parcel_id:     self.parcel_id,
      property_type: self.property_type,
      value:         self.value,
      unit:          self.unit,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `preci_parcels` row.
pub struct RawParcel {
  pub id:           i64,
  pub house_number: Option<String>,
  pub landuse:      Option<String>,
  pub address:      Option<String>,
  pub parcel_id:    Option<String>,
  pub geometry:     Option<String>,
}

impl RawParcel {
  /// Columns: `id, "HouseNumbe", "Landuse", address, "parcelId", geom`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      house_number: row.get(1)?,
      landuse:      row.get(2)?,
      address:      row.get(3)?,
      parcel_id:    row.get(4)?,
      geometry:     row.get(5)?,
    })
  }

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
