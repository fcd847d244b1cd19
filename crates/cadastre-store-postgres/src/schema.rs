//! Schema bootstrap for the PostGIS store.

use crate::config::quote_ident;

/// Table DDL; idempotent. The `mines` and parcels tables mirror shapefile
/// imports and keep their column names.
pub fn schema(parcels_table: &str) -> String {
  let parcels = quote_ident(parcels_table);
  format!(
    r#"
CREATE EXTENSION IF NOT EXISTS postgis;

CREATE TABLE IF NOT EXISTS owners (
    id           BIGSERIAL PRIMARY KEY,
    name         TEXT NOT NULL,
    contact_info TEXT,
    address      TEXT,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS mining_claims (
    id           BIGSERIAL PRIMARY KEY,
    claim_number TEXT NOT NULL,
    claim_type   TEXT,
    status       TEXT,
    holder       TEXT,
    geometry     geometry,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS mines (
    id           BIGSERIAL PRIMARY KEY,
    "Mine Name"  TEXT NOT NULL,
    "Mineral"    TEXT,
    "Area"       TEXT,
    "District"   TEXT,
    "Licence No" TEXT,
    "Mine No"    TEXT,
    "Rights"     TEXT,
    "Ristrictns" TEXT,
    geom         geometry
);

CREATE TABLE IF NOT EXISTS properties (
    id            BIGSERIAL PRIMARY KEY,
    parcel_id     TEXT NOT NULL,
    property_type TEXT NOT NULL,
    value         DOUBLE PRECISION,
    unit          TEXT,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS {parcels} (
    id           BIGSERIAL PRIMARY KEY,
    "HouseNumbe" TEXT,
    "Landuse"    TEXT,
    address      TEXT,
    "parcelId"   TEXT,
    geom         geometry
);
"#
  )
}

/// Spatial index on mines; run inside its own transaction at startup.
pub const SPATIAL_INDEX: &str =
  "CREATE INDEX IF NOT EXISTS idx_mines_geom ON mines USING GIST (geom)";
