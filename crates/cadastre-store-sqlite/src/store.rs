//! [`SqliteStore`] — the SQLite implementation of [`CadastreStore`].

use std::path::Path;

use cadastre_core::{
  Geometry,
  claim::{MiningClaim, NewMiningClaim},
  geometry::BoundingBox,
  mine::{Mine, NewMine},
  owner::{NewOwner, Owner},
  parcel::Parcel,
  property::{NewProperty, Property},
  store::CadastreStore,
};
use rusqlite::{OptionalExtension as _, Row, params_from_iter, types::Type, types::Value};

use crate::{
  Result,
  encode::{RawClaim, RawMine, RawOwner, RawParcel, RawProperty, encode_geometry},
  schema::{SCHEMA, SPATIAL_INDEX},
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

const SELECT_OWNERS: &str =
  "SELECT id, name, contact_info, address, created_at, updated_at FROM owners ORDER BY id";
const SELECT_OWNER: &str =
  "SELECT id, name, contact_info, address, created_at, updated_at FROM owners WHERE id = ?1";
const INSERT_OWNER: &str = "INSERT INTO owners (name, contact_info, address) VALUES (?1, ?2, ?3)
   RETURNING id, name, contact_info, address, created_at, updated_at";
const UPDATE_OWNER: &str = "UPDATE owners
   SET name = ?2, contact_info = ?3, address = ?4,
       updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
   WHERE id = ?1
   RETURNING id, name, contact_info, address, created_at, updated_at";
const DELETE_OWNER: &str = "DELETE FROM owners WHERE id = ?1 RETURNING id";

const SELECT_CLAIMS: &str = "SELECT id, claim_number, claim_type, status, holder, geometry,
          created_at, updated_at
   FROM mining_claims ORDER BY id";
const SELECT_CLAIM: &str = "SELECT id, claim_number, claim_type, status, holder, geometry,
          created_at, updated_at
   FROM mining_claims WHERE id = ?1";
const INSERT_CLAIM: &str = "INSERT INTO mining_claims (claim_number, claim_type, status, holder, geometry)
   VALUES (?1, ?2, ?3, ?4, ?5)
   RETURNING id, claim_number, claim_type, status, holder, geometry, created_at, updated_at";
const UPDATE_CLAIM: &str = "UPDATE mining_claims
   SET claim_number = ?2, claim_type = ?3, status = ?4, holder = ?5, geometry = ?6,
       updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
   WHERE id = ?1
   RETURNING id, claim_number, claim_type, status, holder, geometry, created_at, updated_at";
const DELETE_CLAIM: &str = "DELETE FROM mining_claims WHERE id = ?1 RETURNING id";

const SELECT_MINES: &str = r#"SELECT id, "Mine Name", "Mineral", "Area", "District", "Licence No",
          "Mine No", "Rights", "Ristrictns", geom
   FROM mines ORDER BY id"#;
const SELECT_MINE: &str = r#"SELECT id, "Mine Name", "Mineral", "Area", "District", "Licence No",
          "Mine No", "Rights", "Ristrictns", geom
   FROM mines WHERE id = ?1"#;
const INSERT_MINE: &str = r#"INSERT INTO mines (
     "Mine Name", "Mineral", "Area", "District", "Licence No",
     "Mine No", "Rights", "Ristrictns", geom
   ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
   RETURNING id, "Mine Name", "Mineral", "Area", "District", "Licence No",
             "Mine No", "Rights", "Ristrictns", geom"#;
const UPDATE_MINE: &str = r#"UPDATE mines
   SET "Mine Name" = ?2, "Mineral" = ?3, "Area" = ?4, "District" = ?5, "Licence No" = ?6,
       "Mine No" = ?7, "Rights" = ?8, "Ristrictns" = ?9, geom = ?10
   WHERE id = ?1
   RETURNING id, "Mine Name", "Mineral", "Area", "District", "Licence No",
             "Mine No", "Rights", "Ristrictns", geom"#;

const SELECT_PROPERTIES: &str = "SELECT id, parcel_id, property_type, value, unit, created_at, updated_at
   FROM properties ORDER BY created_at DESC, id DESC";
const SELECT_PROPERTY: &str = "SELECT id, parcel_id, property_type, value, unit, created_at, updated_at
   FROM properties WHERE id = ?1";
const INSERT_PROPERTY: &str = "INSERT INTO properties (parcel_id, property_type, value, unit)
   VALUES (?1, ?2, ?3, ?4)
   RETURNING id, parcel_id, property_type, value, unit, created_at, updated_at";
const UPDATE_PROPERTY: &str = "UPDATE properties
   SET parcel_id = ?2, property_type = ?3, value = ?4, unit = ?5,
       updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
   WHERE id = ?1
   RETURNING id, parcel_id, property_type, value, unit, created_at, updated_at";
const DELETE_PROPERTY: &str = "DELETE FROM properties WHERE id = ?1 RETURNING id";

const SELECT_PARCELS: &str = r#"SELECT id, "HouseNumbe", "Landuse", address, "parcelId", geom
   FROM preci_parcels ORDER BY id"#;
const SELECT_PARCEL: &str = r#"SELECT id, "HouseNumbe", "Landuse", address, "parcelId", geom
   FROM preci_parcels WHERE id = ?1"#;

// The R*Tree and its shadow tables are index internals, not user tables.
const SELECT_TABLES: &str = "SELECT name FROM sqlite_master
   WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name NOT GLOB 'mines_geom_idx*'
   ORDER BY name";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A cadastre store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, create the schema and build the
  /// spatial index.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn };
    store.init_schema().await?;
    store.bootstrap_spatial_index().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Create the mines R*Tree if missing and (re)index every mine that has a
  /// geometry, all in one transaction. Returns the number of mines indexed.
  ///
  /// Idempotent: running it again rebuilds the same entries.
  pub async fn bootstrap_spatial_index(&self) -> Result<usize> {
    self
      .with_transaction(|tx| {
        tx.execute_batch(SPATIAL_INDEX)?;

        let mut stmt = tx.prepare("SELECT id, geom FROM mines WHERE geom IS NOT NULL")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut indexed = 0;
        for (id, text) in rows {
          let geometry = Geometry::from_geojson(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
          if let Some(bbox) = geometry.bbox() {
            index_mine(tx, id, Some(bbox))?;
            indexed += 1;
          }
        }
        Ok(indexed)
      })
      .await
  }

  /// Run `work` as one unit of work: `BEGIN`, then `COMMIT` if it succeeds or
  /// `ROLLBACK` if it fails. The failure is returned unchanged.
  pub async fn with_transaction<T, F>(&self, work: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let value = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        match work(&tx) {
          Ok(value) => {
            tx.commit()?;
            Ok(value)
          }
          Err(e) => {
            // Dropping an uncommitted transaction rolls it back.
            drop(tx);
            Err(e.into())
          }
        }
      })
      .await?;
    Ok(value)
  }

  /// Run one parameterized statement and map every returned row.
  async fn query_rows<T, F>(&self, sql: &'static str, params: Vec<Value>, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run one parameterized statement that must produce exactly one row.
  async fn query_row<T, F>(&self, sql: &'static str, params: Vec<Value>, map: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params_from_iter(params.iter()), map)?)
      })
      .await?;
    Ok(row)
  }

  /// Run one parameterized statement that produces at most one row.
  async fn query_opt<T, F>(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    map: F,
  ) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params_from_iter(params.iter()), map).optional()?)
      })
      .await?;
    Ok(row)
  }

  async fn delete_returning(&self, sql: &'static str, id: i64) -> Result<bool> {
    let ids = self.query_rows(sql, vec![Value::from(id)], |row| row.get::<_, i64>(0)).await?;
    Ok(!ids.is_empty())
  }
}

/// Replace the R*Tree entry of mine `id` with `bbox`, or drop it when the
/// mine has no geometry.
fn index_mine(
  conn: &rusqlite::Connection,
  id:   i64,
  bbox: Option<BoundingBox>,
) -> rusqlite::Result<()> {
  conn.execute("DELETE FROM mines_geom_idx WHERE id = ?1", [id])?;
  if let Some(b) = bbox {
    conn.execute(
      "INSERT INTO mines_geom_idx (id, min_x, max_x, min_y, max_y) VALUES (?1, ?2, ?3, ?4, ?5)",
      rusqlite::params![id, b.min_x, b.max_x, b.min_y, b.max_y],
    )?;
  }
  Ok(())
}

fn owner_params(input: NewOwner) -> Vec<Value> {
  vec![input.name.into(), input.contact_info.into(), input.address.into()]
}

fn claim_params(input: NewMiningClaim) -> Result<Vec<Value>> {
  let geometry = encode_geometry(input.geometry.as_ref())?;
  Ok(vec![
    input.claim_number.into(),
    input.claim_type.into(),
    input.status.into(),
    input.holder.into(),
    geometry.into(),
  ])
}

fn mine_params(input: NewMine) -> Result<Vec<Value>> {
  let geometry = encode_geometry(input.geometry.as_ref())?;
  Ok(vec![
    input.name.into(),
    input.mineral.into(),
    input.area.into(),
    input.district.into(),
    input.licence_no.into(),
    input.mine_no.into(),
    input.rights.into(),
    input.restrictions.into(),
    geometry.into(),
  ])
}

fn property_params(input: NewProperty) -> Vec<Value> {
  vec![
    input.parcel_id.into(),
    input.property_type.into(),
    input.value.into(),
    input.unit.into(),
  ]
}

fn with_id(id: i64, mut params: Vec<Value>) -> Vec<Value> {
  params.insert(0, Value::from(id));
  params
}

// ─── CadastreStore impl ──────────────────────────────────────────────────────

impl CadastreStore for SqliteStore {
  type Error = crate::Error;

  // ── Owners ────────────────────────────────────────────────────────────────

  async fn list_owners(&self) -> Result<Vec<Owner>> {
    let raws = self.query_rows(SELECT_OWNERS, vec![], RawOwner::from_row).await?;
    raws.into_iter().map(RawOwner::into_owner).collect()
  }

  async fn get_owner(&self, id: i64) -> Result<Option<Owner>> {
    let raw = self.query_opt(SELECT_OWNER, vec![id.into()], RawOwner::from_row).await?;
    raw.map(RawOwner::into_owner).transpose()
  }

  async fn create_owner(&self, input: NewOwner) -> Result<Owner> {
    self
      .query_row(INSERT_OWNER, owner_params(input), RawOwner::from_row)
      .await?
      .into_owner()
  }

  async fn update_owner(&self, id: i64, input: NewOwner) -> Result<Option<Owner>> {
    let raw = self
      .query_opt(UPDATE_OWNER, with_id(id, owner_params(input)), RawOwner::from_row)
      .await?;
    raw.map(RawOwner::into_owner).transpose()
  }

  async fn delete_owner(&self, id: i64) -> Result<bool> {
    self.delete_returning(DELETE_OWNER, id).await
  }

  // ── Mining claims ─────────────────────────────────────────────────────────

  async fn list_claims(&self) -> Result<Vec<MiningClaim>> {
    let raws = self.query_rows(SELECT_CLAIMS, vec![], RawClaim::from_row).await?;
    raws.into_iter().map(RawClaim::into_claim).collect()
  }

  async fn get_claim(&self, id: i64) -> Result<Option<MiningClaim>> {
    let raw = self.query_opt(SELECT_CLAIM, vec![id.into()], RawClaim::from_row).await?;
    raw.map(RawClaim::into_claim).transpose()
  }

  async fn create_claim(&self, input: NewMiningClaim) -> Result<MiningClaim> {
    self
      .query_row(INSERT_CLAIM, claim_params(input)?, RawClaim::from_row)
      .await?
      .into_claim()
  }

  async fn update_claim(&self, id: i64, input: NewMiningClaim) -> Result<Option<MiningClaim>> {
    let raw = self
      .query_opt(UPDATE_CLAIM, with_id(id, claim_params(input)?), RawClaim::from_row)
      .await?;
    raw.map(RawClaim::into_claim).transpose()
  }

  async fn delete_claim(&self, id: i64) -> Result<bool> {
    self.delete_returning(DELETE_CLAIM, id).await
  }

  // ── Mines: writes keep the R*Tree in the same transaction ─────────────────

  async fn list_mines(&self) -> Result<Vec<Mine>> {
    let raws = self.query_rows(SELECT_MINES, vec![], RawMine::from_row).await?;
    raws.into_iter().map(RawMine::into_mine).collect()
  }

  async fn get_mine(&self, id: i64) -> Result<Option<Mine>> {
    let raw = self.query_opt(SELECT_MINE, vec![id.into()], RawMine::from_row).await?;
    raw.map(RawMine::into_mine).transpose()
  }

  async fn create_mine(&self, input: NewMine) -> Result<Mine> {
    let bbox   = input.geometry.as_ref().and_then(Geometry::bbox);
    let params = mine_params(input)?;

    let raw = self
      .with_transaction(move |tx| {
        let raw = tx.query_row(INSERT_MINE, params_from_iter(params.iter()), RawMine::from_row)?;
        index_mine(tx, raw.id, bbox)?;
        Ok(raw)
      })
      .await?;

    raw.into_mine()
  }

  async fn update_mine(&self, id: i64, input: NewMine) -> Result<Option<Mine>> {
    let bbox   = input.geometry.as_ref().and_then(Geometry::bbox);
    let params = with_id(id, mine_params(input)?);

    let raw = self
      .with_transaction(move |tx| {
        let raw = tx
          .query_row(UPDATE_MINE, params_from_iter(params.iter()), RawMine::from_row)
          .optional()?;
        if raw.is_some() {
          index_mine(tx, id, bbox)?;
        }
        Ok(raw)
      })
      .await?;

    raw.map(RawMine::into_mine).transpose()
  }

  async fn delete_mine(&self, id: i64) -> Result<bool> {
    self
      .with_transaction(move |tx| {
        tx.execute("DELETE FROM mines_geom_idx WHERE id = ?1", [id])?;
        Ok(tx.execute("DELETE FROM mines WHERE id = ?1", [id])? > 0)
      })
      .await
  }

  // ── Properties ────────────────────────────────────────────────────────────

  async fn list_properties(&self) -> Result<Vec<Property>> {
    let raws = self.query_rows(SELECT_PROPERTIES, vec![], RawProperty::from_row).await?;
    raws.into_iter().map(RawProperty::into_property).collect()
  }

  async fn get_property(&self, id: i64) -> Result<Option<Property>> {
    let raw = self.query_opt(SELECT_PROPERTY, vec![id.into()], RawProperty::from_row).await?;
    raw.map(RawProperty::into_property).transpose()
  }

  async fn create_property(&self, input: NewProperty) -> Result<Property> {
    self
      .query_row(INSERT_PROPERTY, property_params(input), RawProperty::from_row)
      .await?
      .into_property()
  }

  async fn update_property(&self, id: i64, input: NewProperty) -> Result<Option<Property>> {
    let raw = self
      .query_opt(UPDATE_PROPERTY, with_id(id, property_params(input)), RawProperty::from_row)
      .await?;
    raw.map(RawProperty::into_property).transpose()
  }

  async fn delete_property(&self, id: i64) -> Result<bool> {
    self.delete_returning(DELETE_PROPERTY, id).await
  }

  // ── Parcels ───────────────────────────────────────────────────────────────

  async fn list_parcels(&self) -> Result<Vec<Parcel>> {
    let raws = self.query_rows(SELECT_PARCELS, vec![], RawParcel::from_row).await?;
    raws.into_iter().map(RawParcel::into_parcel).collect()
  }

  async fn get_parcel(&self, id: i64) -> Result<Option<Parcel>> {
    let raw = self.query_opt(SELECT_PARCEL, vec![id.into()], RawParcel::from_row).await?;
    raw.map(RawParcel::into_parcel).transpose()
  }

  // ── Diagnostics ───────────────────────────────────────────────────────────

  async fn list_tables(&self) -> Result<Vec<String>> {
    self.query_rows(SELECT_TABLES, vec![], |row| row.get::<_, String>(0)).await
  }

  async fn ping(&self) -> Result<()> {
    self.query_row("SELECT 1", vec![], |row| row.get::<_, i64>(0)).await?;
    Ok(())
  }

  async fn close(&self) -> Result<()> {
    self.conn.clone().close().await?;
    Ok(())
  }
}
