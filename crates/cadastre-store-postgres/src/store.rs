//! [`PgStore`] — the PostGIS implementation of [`CadastreStore`].
//!
//! Statements run directly against `&PgPool`: each one checks out a pooled
//! connection and the pool guard returns it when the statement finishes,
//! whether it succeeded or not.

use std::sync::Arc;

use cadastre_core::{
  claim::{MiningClaim, NewMiningClaim},
  mine::{Mine, NewMine},
  owner::{NewOwner, Owner},
  parcel::Parcel,
  property::{NewProperty, Property},
  store::CadastreStore,
};
use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool, postgres::PgPoolOptions};

use crate::{
  DatabaseConfig, Result,
  config::quote_ident,
  rows::{ClaimRow, MineRow, OwnerRow, ParcelRow, PropertyRow, encode_geometry},
  schema::{SPATIAL_INDEX, schema},
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

const SELECT_OWNERS: &str =
  "SELECT id, name, contact_info, address, created_at, updated_at FROM owners ORDER BY id";
const SELECT_OWNER: &str =
  "SELECT id, name, contact_info, address, created_at, updated_at FROM owners WHERE id = $1";
const INSERT_OWNER: &str = "INSERT INTO owners (name, contact_info, address) VALUES ($1, $2, $3)
   RETURNING id, name, contact_info, address, created_at, updated_at";
const UPDATE_OWNER: &str = "UPDATE owners
   SET name = $2, contact_info = $3, address = $4, updated_at = NOW()
   WHERE id = $1
   RETURNING id, name, contact_info, address, created_at, updated_at";

const CLAIM_COLUMNS: &str = "id, claim_number, claim_type, status, holder,
   ST_AsGeoJSON(geometry) AS geometry, created_at, updated_at";
const INSERT_CLAIM: &str = "INSERT INTO mining_claims (claim_number, claim_type, status, holder, geometry)
   VALUES ($1, $2, $3, $4, ST_GeomFromGeoJSON($5))
   RETURNING id, claim_number, claim_type, status, holder,
             ST_AsGeoJSON(geometry) AS geometry, created_at, updated_at";
const UPDATE_CLAIM: &str = "UPDATE mining_claims
   SET claim_number = $2, claim_type = $3, status = $4, holder = $5,
       geometry = ST_GeomFromGeoJSON($6), updated_at = NOW()
   WHERE id = $1
   RETURNING id, claim_number, claim_type, status, holder,
             ST_AsGeoJSON(geometry) AS geometry, created_at, updated_at";

// Legacy mine columns come from imported shapefiles with loose types; the
// casts pin them to what `MineRow` decodes.
pub(crate) const MINE_COLUMNS: &str = r#"id::bigint AS id, COALESCE("Mine Name"::text, '') AS name,
   "Mineral"::text AS mineral, "Area"::text AS area, "District"::text AS district,
   "Licence No"::text AS licence_no, "Mine No"::text AS mine_no, "Rights"::text AS rights,
   "Ristrictns"::text AS restrictions, ST_AsGeoJSON(geom) AS geometry"#;
const INSERT_MINE: &str = r#"INSERT INTO mines (
     "Mine Name", "Mineral", "Area", "District", "Licence No",
     "Mine No", "Rights", "Ristrictns", geom
   ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, ST_GeomFromGeoJSON($9))
   RETURNING "#;
const UPDATE_MINE: &str = r#"UPDATE mines
   SET "Mine Name" = $2, "Mineral" = $3, "Area" = $4, "District" = $5, "Licence No" = $6,
       "Mine No" = $7, "Rights" = $8, "Ristrictns" = $9, geom = ST_GeomFromGeoJSON($10)
   WHERE id = $1
   RETURNING "#;

const SELECT_PROPERTIES: &str = "SELECT id, parcel_id, property_type, value, unit, created_at, updated_at
   FROM properties ORDER BY created_at DESC, id DESC";
const SELECT_PROPERTY: &str = "SELECT id, parcel_id, property_type, value, unit, created_at, updated_at
   FROM properties WHERE id = $1";
const INSERT_PROPERTY: &str = "INSERT INTO properties (parcel_id, property_type, value, unit)
   VALUES ($1, $2, $3, $4)
   RETURNING id, parcel_id, property_type, value, unit, created_at, updated_at";
const UPDATE_PROPERTY: &str = "UPDATE properties
   SET parcel_id = $2, property_type = $3, value = $4, unit = $5, updated_at = NOW()
   WHERE id = $1
   RETURNING id, parcel_id, property_type, value, unit, created_at, updated_at";

const PARCEL_COLUMNS: &str = r#"id::bigint AS id, "HouseNumbe"::text AS house_number,
   "Landuse"::text AS landuse, address::text AS address, "parcelId"::text AS parcel_id,
   ST_AsGeoJSON(geom) AS geometry"#;

const SELECT_TABLES: &str = "SELECT tablename::text FROM pg_catalog.pg_tables
   WHERE schemaname = 'public' ORDER BY tablename";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A cadastre store backed by a PostGIS database.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct PgStore {
  pool:           PgPool,
  parcels_table:  Arc<str>,
  select_parcels: Arc<str>,
  select_parcel:  Arc<str>,
  select_claims:  Arc<str>,
  select_claim:   Arc<str>,
  select_mines:   Arc<str>,
  select_mine:    Arc<str>,
  insert_mine:    Arc<str>,
  update_mine:    Arc<str>,
}

impl PgStore {
  /// Build a bounded pool from `config` and verify that a connection can be
  /// opened.
  pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(config.max_connections)
      .idle_timeout(config.idle_timeout)
      .acquire_timeout(config.acquire_timeout)
      .connect_with(config.connect_options()?)
      .await?;

    tracing::info!(
      max_connections = config.max_connections,
      idle_timeout = ?config.idle_timeout,
      acquire_timeout = ?config.acquire_timeout,
      "connected to PostgreSQL"
    );
    Ok(Self::from_pool(pool, &config.parcels_table))
  }

  /// Wrap an existing pool.
  pub fn from_pool(pool: PgPool, parcels_table: &str) -> Self {
    let table = quote_ident(parcels_table);
    Self {
      pool,
      parcels_table:  parcels_table.into(),
      select_parcels: format!("SELECT {PARCEL_COLUMNS} FROM {table} ORDER BY id").into(),
      select_parcel:  format!("SELECT {PARCEL_COLUMNS} FROM {table} WHERE id = $1").into(),
      select_claims:  format!("SELECT {CLAIM_COLUMNS} FROM mining_claims ORDER BY id").into(),
      select_claim:   format!("SELECT {CLAIM_COLUMNS} FROM mining_claims WHERE id = $1").into(),
      select_mines:   format!("SELECT {MINE_COLUMNS} FROM mines ORDER BY id").into(),
      select_mine:    format!("SELECT {MINE_COLUMNS} FROM mines WHERE id = $1").into(),
      insert_mine:    format!("{INSERT_MINE}{MINE_COLUMNS}").into(),
      update_mine:    format!("{UPDATE_MINE}{MINE_COLUMNS}").into(),
    }
  }

  pub fn pool(&self) -> &PgPool { &self.pool }

  /// Create the PostGIS extension and every table, if missing.
  pub async fn migrate(&self) -> Result<()> {
    let ddl = schema(&self.parcels_table);
    sqlx::raw_sql(&ddl).execute(&self.pool).await?;
    tracing::debug!("schema ensured");
    Ok(())
  }

  /// Ensure the GiST index on `mines.geom`, in its own transaction.
  pub async fn bootstrap_spatial_index(&self) -> Result<()> {
    self
      .with_transaction(|conn| {
        Box::pin(async move {
          sqlx::query(SPATIAL_INDEX).execute(&mut *conn).await?;
          Ok(())
        })
      })
      .await?;
    tracing::info!("spatial index on mines ensured");
    Ok(())
  }

  /// Run `work` as one unit of work on a single pooled connection: `BEGIN`,
  /// then `COMMIT` if it succeeds or `ROLLBACK` if it fails. The failure is
  /// returned unchanged and the connection goes back to the pool either way.
  pub async fn with_transaction<T, F>(&self, work: F) -> Result<T>
  where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>> + Send,
  {
    let mut tx = self.pool.begin().await?;
    match work(&mut *tx).await {
      Ok(value) => {
        tx.commit().await?;
        Ok(value)
      }
      Err(e) => {
        if let Err(rollback) = tx.rollback().await {
          tracing::warn!(error = %rollback, "rollback failed");
        }
        Err(e)
      }
    }
  }

  async fn delete_by_id(&self, sql: &'static str, id: i64) -> Result<bool> {
    let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
    Ok(done.rows_affected() > 0)
  }
}

// ─── CadastreStore impl ──────────────────────────────────────────────────────

impl CadastreStore for PgStore {
  type Error = crate::Error;

  // ── Owners ────────────────────────────────────────────────────────────────

  async fn list_owners(&self) -> Result<Vec<Owner>> {
    let rows = sqlx::query_as::<_, OwnerRow>(SELECT_OWNERS).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(Owner::from).collect())
  }

  async fn get_owner(&self, id: i64) -> Result<Option<Owner>> {
    let row = sqlx::query_as::<_, OwnerRow>(SELECT_OWNER)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Owner::from))
  }

  async fn create_owner(&self, input: NewOwner) -> Result<Owner> {
    let row = sqlx::query_as::<_, OwnerRow>(INSERT_OWNER)
      .bind(input.name)
      .bind(input.contact_info)
      .bind(input.address)
      .fetch_one(&self.pool)
      .await?;
    Ok(row.into())
  }

  async fn update_owner(&self, id: i64, input: NewOwner) -> Result<Option<Owner>> {
    let row = sqlx::query_as::<_, OwnerRow>(UPDATE_OWNER)
      .bind(id)
      .bind(input.name)
      .bind(input.contact_info)
      .bind(input.address)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Owner::from))
  }

  async fn delete_owner(&self, id: i64) -> Result<bool> {
    self.delete_by_id("DELETE FROM owners WHERE id = $1", id).await
  }

  // ── Mining claims ─────────────────────────────────────────────────────────

  async fn list_claims(&self) -> Result<Vec<MiningClaim>> {
    let rows = sqlx::query_as::<_, ClaimRow>(&self.select_claims).fetch_all(&self.pool).await?;
    rows.into_iter().map(ClaimRow::into_claim).collect()
  }

  async fn get_claim(&self, id: i64) -> Result<Option<MiningClaim>> {
    let row = sqlx::query_as::<_, ClaimRow>(&self.select_claim)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(ClaimRow::into_claim).transpose()
  }

  async fn create_claim(&self, input: NewMiningClaim) -> Result<MiningClaim> {
    let geometry = encode_geometry(input.geometry.as_ref())?;
    sqlx::query_as::<_, ClaimRow>(INSERT_CLAIM)
      .bind(input.claim_number)
      .bind(input.claim_type)
      .bind(input.status)
      .bind(input.holder)
      .bind(geometry)
      .fetch_one(&self.pool)
      .await?
      .into_claim()
  }

  async fn update_claim(&self, id: i64, input: NewMiningClaim) -> Result<Option<MiningClaim>> {
    let geometry = encode_geometry(input.geometry.as_ref())?;
    let row = sqlx::query_as::<_, ClaimRow>(UPDATE_CLAIM)
      .bind(id)
      .bind(input.claim_number)
      .bind(input.claim_type)
      .bind(input.status)
      .bind(input.holder)
      .bind(geometry)
      .fetch_optional(&self.pool)
      .await?;
    row.map(ClaimRow::into_claim).transpose()
  }

  async fn delete_claim(&self, id: i64) -> Result<bool> {
    self.delete_by_id("DELETE FROM mining_claims WHERE id = $1", id).await
  }

  // ── Mines ─────────────────────────────────────────────────────────────────

  async fn list_mines(&self) -> Result<Vec<Mine>> {
    let rows = sqlx::query_as::<_, MineRow>(&self.select_mines).fetch_all(&self.pool).await?;
    rows.into_iter().map(MineRow::into_mine).collect()
  }

  async fn get_mine(&self, id: i64) -> Result<Option<Mine>> {
    let row = sqlx::query_as::<_, MineRow>(&self.select_mine)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(MineRow::into_mine).transpose()
  }

  async fn create_mine(&self, input: NewMine) -> Result<Mine> {
    let geometry = encode_geometry(input.geometry.as_ref())?;
    sqlx::query_as::<_, MineRow>(&self.insert_mine)
      .bind(input.name)
      .bind(input.mineral)
      .bind(input.area)
      .bind(input.district)
      .bind(input.licence_no)
      .bind(input.mine_no)
      .bind(input.rights)
      .bind(input.restrictions)
      .bind(geometry)
      .fetch_one(&self.pool)
      .await?
      .into_mine()
  }

  async fn update_mine(&self, id: i64, input: NewMine) -> Result<Option<Mine>> {
    let geometry = encode_geometry(input.geometry.as_ref())?;
    let row = sqlx::query_as::<_, MineRow>(&self.update_mine)
      .bind(id)
      .bind(input.name)
      .bind(input.mineral)
      .bind(input.area)
      .bind(input.district)
      .bind(input.licence_no)
      .bind(input.mine_no)
      .bind(input.rights)
      .bind(input.restrictions)
      .bind(geometry)
      .fetch_optional(&self.pool)
      .await?;
    row.map(MineRow::into_mine).transpose()
  }

  async fn delete_mine(&self, id: i64) -> Result<bool> {
    self.delete_by_id("DELETE FROM mines WHERE id = $1", id).await
  }

  // ── Properties ────────────────────────────────────────────────────────────

  async fn list_properties(&self) -> Result<Vec<Property>> {
    let rows = sqlx::query_as::<_, PropertyRow>(SELECT_PROPERTIES).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(Property::from).collect())
  }

  async fn get_property(&self, id: i64) -> Result<Option<Property>> {
    let row = sqlx::query_as::<_, PropertyRow>(SELECT_PROPERTY)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Property::from))
  }

  async fn create_property(&self, input: NewProperty) -> Result<Property> {
    let row = sqlx::query_as::<_, PropertyRow>(INSERT_PROPERTY)
      .bind(input.parcel_id)
      .bind(input.property_type)
      .bind(input.value)
      .bind(input.unit)
      .fetch_one(&self.pool)
      .await?;
    Ok(row.into())
  }

  async fn update_property(&self, id: i64, input: NewProperty) -> Result<Option<Property>> {
    let row = sqlx::query_as::<_, PropertyRow>(UPDATE_PROPERTY)
      .bind(id)
      .bind(input.parcel_id)
      .bind(input.property_type)
      .bind(input.value)
      .bind(input.unit)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Property::from))
  }

  async fn delete_property(&self, id: i64) -> Result<bool> {
    self.delete_by_id("DELETE FROM properties WHERE id = $1", id).await
  }

  // ── Parcels ───────────────────────────────────────────────────────────────

  async fn list_parcels(&self) -> Result<Vec<Parcel>> {
    let rows = sqlx::query_as::<_, ParcelRow>(&self.select_parcels).fetch_all(&self.pool).await?;
    rows.into_iter().map(ParcelRow::into_parcel).collect()
  }

  async fn get_parcel(&self, id: i64) -> Result<Option<Parcel>> {
    let row = sqlx::query_as::<_, ParcelRow>(&self.select_parcel)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(ParcelRow::into_parcel).transpose()
  }

  // ── Diagnostics ───────────────────────────────────────────────────────────

  async fn list_tables(&self) -> Result<Vec<String>> {
    Ok(sqlx::query_scalar::<_, String>(SELECT_TABLES).fetch_all(&self.pool).await?)
  }

  async fn ping(&self) -> Result<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }

  async fn close(&self) -> Result<()> {
    self.pool.close().await;
    tracing::info!("connection pool closed");
    Ok(())
  }
}
