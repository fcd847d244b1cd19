//! SQL schema for the cadastre SQLite store.
//!
//! Executed once at connection startup. Column names of `mines` and
//! `preci_parcels` follow the shapefile imports they mirror.

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS owners (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    contact_info TEXT,
    address      TEXT,
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS mining_claims (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    claim_number TEXT NOT NULL,
    claim_type   TEXT,
    status       TEXT,
    holder       TEXT,
    geometry     TEXT,            -- GeoJSON
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS mines (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    "Mine Name"  TEXT NOT NULL,
    "Mineral"    TEXT,
    "Area"       TEXT,
    "District"   TEXT,
    "Licence No" TEXT,
    "Mine No"    TEXT,
    "Rights"     TEXT,
    "Ristrictns" TEXT,
    geom         TEXT             -- GeoJSON
);

-- parcel_id refers to preci_parcels."parcelId", which the survey import
-- does not guarantee to be unique, so no FOREIGN KEY is declared.
CREATE TABLE IF NOT EXISTS properties (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    parcel_id     TEXT NOT NULL,
    property_type TEXT NOT NULL,
    value         REAL,
    unit          TEXT,
    created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS preci_parcels (
    id           INTEGER PRIMARY KEY,
    "HouseNumbe" TEXT,
    "Landuse"    TEXT,
    address      TEXT,
    "parcelId"   TEXT,
    geom         TEXT             -- GeoJSON
);

CREATE INDEX IF NOT EXISTS properties_created_idx ON properties(created_at);

PRAGMA user_version = 1;
"#;

/// R*Tree over mine bounding boxes. Created at startup inside its own
/// transaction together with the backfill of existing rows.
pub const SPATIAL_INDEX: &str = "
CREATE VIRTUAL TABLE IF NOT EXISTS mines_geom_idx USING rtree(
    id,
    min_x, max_x,
    min_y, max_y
);
";
