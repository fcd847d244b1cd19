//! Integration tests for `SqliteStore` against an in-memory database.

use cadastre_core::{
  Geometry,
  claim::NewMiningClaim,
  mine::NewMine,
  owner::NewOwner,
  property::NewProperty,
  store::CadastreStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn polygon() -> Geometry {
  Geometry::Polygon {
    coordinates: vec![vec![
      vec![30.81, -20.07],
      vec![30.83, -20.07],
      vec![30.83, -20.05],
      vec![30.81, -20.05],
      vec![30.81, -20.07],
    ]],
  }
}

fn assert_same_shape(a: &Geometry, b: &Geometry) {
  assert_eq!(a.kind(), b.kind());
  let (a, b) = (a.bbox().unwrap(), b.bbox().unwrap());
  for (x, y) in [(a.min_x, b.min_x), (a.min_y, b.min_y), (a.max_x, b.max_x), (a.max_y, b.max_y)] {
    assert!((x - y).abs() < 1e-9, "{x} != {y}");
  }
}

async fn index_count(s: &SqliteStore) -> i64 {
  s.with_transaction(|tx| tx.query_row("SELECT count(*) FROM mines_geom_idx", [], |r| r.get(0)))
    .await
    .unwrap()
}

// ─── Owners ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_owner() {
  let s = store().await;

  let created = s.create_owner(NewOwner::named("Acme Ltd")).await.unwrap();
  assert_eq!(created.name, "Acme Ltd");
  assert!(created.contact_info.is_none());
  assert!(created.address.is_none());

  let fetched = s.get_owner(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_owner_missing_returns_none() {
  let s = store().await;
  assert!(s.get_owner(999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_owners_in_id_order() {
  let s = store().await;
  for name in ["Acme Ltd", "Zimbo Gold", "Bikita Minerals"] {
    s.create_owner(NewOwner::named(name)).await.unwrap();
  }

  let all = s.list_owners().await.unwrap();
  let names: Vec<_> = all.iter().map(|o| o.name.as_str()).collect();
  assert_eq!(names, ["Acme Ltd", "Zimbo Gold", "Bikita Minerals"]);
}

#[tokio::test]
async fn update_owner_replaces_fields_and_refreshes_timestamp() {
  let s = store().await;
  let created = s.create_owner(NewOwner::named("Acme")).await.unwrap();

  let input = NewOwner {
    name:         "Acme Holdings".into(),
    contact_info: Some("info@acme.co.zw".into()),
    address:      Some("12 Hughes St, Masvingo".into()),
  };
  let updated = s.update_owner(created.id, input).await.unwrap().unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.name, "Acme Holdings");
  assert_eq!(updated.address.as_deref(), Some("12 Hughes St, Masvingo"));
  assert_eq!(updated.created_at, created.created_at);
  assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_missing_owner_returns_none() {
  let s = store().await;
  let result = s.update_owner(42, NewOwner::named("Ghost")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_owner_twice_reports_not_found_second_time() {
  let s = store().await;
  let owner = s.create_owner(NewOwner::named("Short-lived")).await.unwrap();

  assert!(s.delete_owner(owner.id).await.unwrap());
  assert!(!s.delete_owner(owner.id).await.unwrap());
  assert!(s.get_owner(owner.id).await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_creates_are_all_retrievable() {
  let s = store().await;

  let handles: Vec<_> = (0..20)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.create_owner(NewOwner::named(format!("owner-{i}"))).await })
    })
    .collect();

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap().unwrap().id);
  }
  ids.sort_unstable();
  ids.dedup();
  assert_eq!(ids.len(), 20);

  for id in ids {
    assert!(s.get_owner(id).await.unwrap().is_some());
  }
}

// ─── Mining claims ───────────────────────────────────────────────────────────

#[tokio::test]
async fn claim_geometry_roundtrips_through_list() {
  let s = store().await;
  let input = NewMiningClaim {
    claim_number: "MC-0042".into(),
    claim_type:   Some("gold".into()),
    status:       Some("active".into()),
    holder:       Some("Acme Ltd".into()),
    geometry:     Some(polygon()),
  };
  s.create_claim(input).await.unwrap();

  let claims = s.list_claims().await.unwrap();
  assert_eq!(claims.len(), 1);
  assert_same_shape(claims[0].geometry.as_ref().unwrap(), &polygon());
}

#[tokio::test]
async fn claim_without_geometry_stores_null() {
  let s = store().await;
  let input = NewMiningClaim {
    claim_number: "MC-7".into(),
    claim_type:   None,
    status:       None,
    holder:       None,
    geometry:     None,
  };
  let claim = s.create_claim(input).await.unwrap();
  assert!(s.get_claim(claim.id).await.unwrap().unwrap().geometry.is_none());
}

// ─── Mines and the spatial index ─────────────────────────────────────────────

#[tokio::test]
async fn mine_write_maintains_spatial_index() {
  let s = store().await;

  let mut input = NewMine::named("Renco");
  input.mineral = Some("gold".into());
  input.geometry = Some(polygon());
  let mine = s.create_mine(input).await.unwrap();
  assert_eq!(index_count(&s).await, 1);

  // Clearing the geometry removes the entry.
  let cleared = s.update_mine(mine.id, NewMine::named("Renco")).await.unwrap().unwrap();
  assert!(cleared.geometry.is_none());
  assert_eq!(index_count(&s).await, 0);

  assert!(s.delete_mine(mine.id).await.unwrap());
  assert!(!s.delete_mine(mine.id).await.unwrap());
}

#[tokio::test]
async fn delete_mine_drops_index_entry() {
  let s = store().await;
  let mut input = NewMine::named("Bikita");
  input.geometry = Some(Geometry::Point { coordinates: vec![31.9, -20.1] });
  let mine = s.create_mine(input).await.unwrap();

  assert!(s.delete_mine(mine.id).await.unwrap());
  assert_eq!(index_count(&s).await, 0);
}

#[tokio::test]
async fn bootstrap_is_idempotent_and_backfills() {
  let s = store().await;

  // Rows written behind the store's back have no index entry yet.
  let text = polygon().to_geojson().unwrap();
  s.with_transaction(move |tx| {
    tx.execute(r#"INSERT INTO mines ("Mine Name", geom) VALUES ('Legacy', ?1)"#, [text])
  })
  .await
  .unwrap();
  assert_eq!(index_count(&s).await, 0);

  assert_eq!(s.bootstrap_spatial_index().await.unwrap(), 1);
  assert_eq!(s.bootstrap_spatial_index().await.unwrap(), 1);
  assert_eq!(index_count(&s).await, 1);
}

#[tokio::test]
async fn bootstrap_with_corrupt_geometry_leaves_index_untouched() {
  let s = store().await;
  let mut input = NewMine::named("Good");
  input.geometry = Some(polygon());
  s.create_mine(input).await.unwrap();

  s.with_transaction(|tx| {
    tx.execute(r#"INSERT INTO mines ("Mine Name", geom) VALUES ('Bad', 'not geojson')"#, [])
  })
  .await
  .unwrap();
  s.with_transaction(|tx| tx.execute("DELETE FROM mines_geom_idx", [])).await.unwrap();

  assert!(s.bootstrap_spatial_index().await.is_err());
  assert_eq!(index_count(&s).await, 0, "partial backfill must roll back");
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_unit_of_work_rolls_back_every_statement() {
  let s = store().await;

  let result = s
    .with_transaction(|tx| {
      tx.execute("INSERT INTO owners (name) VALUES ('first')", [])?;
      tx.execute("INSERT INTO no_such_table (x) VALUES (1)", [])?;
      Ok(())
    })
    .await;
  assert!(result.is_err());

  assert!(s.list_owners().await.unwrap().is_empty());
}

// ─── Properties ──────────────────────────────────────────────────────────────

fn property(parcel: &str, kind: &str, value: f64) -> NewProperty {
  NewProperty {
    parcel_id:     parcel.into(),
    property_type: kind.into(),
    value:         Some(value),
    unit:          Some("USD".into()),
  }
}

#[tokio::test]
async fn properties_list_newest_first() {
  let s = store().await;
  let first  = s.create_property(property("P-1", "valuation", 1000.0)).await.unwrap();
  let second = s.create_property(property("P-1", "valuation", 1500.0)).await.unwrap();
  let third  = s.create_property(property("P-2", "area", 420.5)).await.unwrap();

  let ids: Vec<_> = s.list_properties().await.unwrap().into_iter().map(|p| p.id).collect();
  assert_eq!(ids, [third.id, second.id, first.id]);
}

#[tokio::test]
async fn property_update_and_delete() {
  let s = store().await;
  let p = s.create_property(property("P-9", "valuation", 10.0)).await.unwrap();

  let updated = s
    .update_property(p.id, property("P-9", "valuation", 12.5))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.value, Some(12.5));

  assert!(s.delete_property(p.id).await.unwrap());
  assert!(s.get_property(p.id).await.unwrap().is_none());
}

// ─── Parcels ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn parcels_decode_legacy_columns() {
  let s = store().await;
  let text = polygon().to_geojson().unwrap();
  s.with_transaction(move |tx| {
    tx.execute(
      r#"INSERT INTO preci_parcels (id, "HouseNumbe", "Landuse", address, "parcelId", geom)
         VALUES (7, '14', 'residential', 'Mucheke', 'MSV-0007', ?1)"#,
      [text],
    )
  })
  .await
  .unwrap();

  let parcels = s.list_parcels().await.unwrap();
  assert_eq!(parcels.len(), 1);
  assert_eq!(parcels[0].house_number.as_deref(), Some("14"));
  assert_eq!(parcels[0].parcel_id.as_deref(), Some("MSV-0007"));
  assert_same_shape(parcels[0].geometry.as_ref().unwrap(), &polygon());

  assert!(s.get_parcel(7).await.unwrap().is_some());
  assert!(s.get_parcel(8).await.unwrap().is_none());
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_tables_includes_schema() {
  let s = store().await;
  let tables = s.list_tables().await.unwrap();
  for t in ["mines", "mining_claims", "owners", "preci_parcels", "properties"] {
    assert!(tables.iter().any(|n| n == t), "missing {t}: {tables:?}");
  }
}

#[tokio::test]
async fn list_tables_hides_spatial_index_internals() {
  let s = store().await;
  let tables = s.list_tables().await.unwrap();
  assert!(!tables.iter().any(|n| n.starts_with("mines_geom_idx")), "{tables:?}");
  assert_eq!(tables, ["mines", "mining_claims", "owners", "preci_parcels", "properties"]);
}

#[tokio::test]
async fn ping_fails_as_connectivity_after_close() {
  let s = store().await;
  s.ping().await.unwrap();

  s.close().await.unwrap();
  let err = s.ping().await.unwrap_err();
  assert!(err.is_connectivity(), "{err}");
  assert!(matches!(
    cadastre_core::Error::from(err),
    cadastre_core::Error::Connectivity(_)
  ));
}
