//! The `CadastreStore` trait: the persistence port.
//!
//! The trait is implemented by storage backends (`cadastre-store-postgres`,
//! `cadastre-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend, so the storage technology can change without touching
//! a handler.

use std::future::Future;

use crate::{
  claim::{MiningClaim, NewMiningClaim},
  mine::{Mine, NewMine},
  owner::{NewOwner, Owner},
  parcel::Parcel,
  property::{NewProperty, Property},
};

/// Abstraction over a cadastre store backend.
///
/// Every method runs against the store directly; nothing is cached. Reads of a
/// single row return `None` when no row matches, updates return `None` when
/// the id does not exist, and deletes return `false` when nothing was removed.
/// Those are not errors.
///
/// Updates are full replacements of the caller-writable columns. The store
/// assigns ids and refreshes `updated_at` itself.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CadastreStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Owners ────────────────────────────────────────────────────────────

  fn list_owners(&self) -> impl Future<Output = Result<Vec<Owner>, Self::Error>> + Send + '_;

  fn get_owner(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  fn create_owner(
    &self,
    input: NewOwner,
  ) -> impl Future<Output = Result<Owner, Self::Error>> + Send + '_;

  fn update_owner(
    &self,
    id: i64,
    input: NewOwner,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  fn delete_owner(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Mining claims ─────────────────────────────────────────────────────

  fn list_claims(
    &self,
  ) -> impl Future<Output = Result<Vec<MiningClaim>, Self::Error>> + Send + '_;

  fn get_claim(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<MiningClaim>, Self::Error>> + Send + '_;

  fn create_claim(
    &self,
    input: NewMiningClaim,
  ) -> impl Future<Output = Result<MiningClaim, Self::Error>> + Send + '_;

  fn update_claim(
    &self,
    id: i64,
    input: NewMiningClaim,
  ) -> impl Future<Output = Result<Option<MiningClaim>, Self::Error>> + Send + '_;

  fn delete_claim(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Mines ─────────────────────────────────────────────────────────────

  fn list_mines(&self) -> impl Future<Output = Result<Vec<Mine>, Self::Error>> + Send + '_;

  fn get_mine(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Mine>, Self::Error>> + Send + '_;

  fn create_mine(
    &self,
    input: NewMine,
  ) -> impl Future<Output = Result<Mine, Self::Error>> + Send + '_;

  fn update_mine(
    &self,
    id: i64,
    input: NewMine,
  ) -> impl Future<Output = Result<Option<Mine>, Self::Error>> + Send + '_;

  fn delete_mine(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Properties ────────────────────────────────────────────────────────

  /// All properties, newest first.
  fn list_properties(
    &self,
  ) -> impl Future<Output = Result<Vec<Property>, Self::Error>> + Send + '_;

  fn get_property(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Property>, Self::Error>> + Send + '_;

  fn create_property(
    &self,
    input: NewProperty,
  ) -> impl Future<Output = Result<Property, Self::Error>> + Send + '_;

  fn update_property(
    &self,
    id: i64,
    input: NewProperty,
  ) -> impl Future<Output = Result<Option<Property>, Self::Error>> + Send + '_;

  fn delete_property(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Parcels (read-only) ───────────────────────────────────────────────

  fn list_parcels(&self) -> impl Future<Output = Result<Vec<Parcel>, Self::Error>> + Send + '_;

  fn get_parcel(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Parcel>, Self::Error>> + Send + '_;

  // ── Diagnostics ───────────────────────────────────────────────────────

  /// Names of the user tables visible to the store connection.
  fn list_tables(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// A trivial round-trip proving the store is reachable.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Release every pooled connection. Called once, on shutdown.
  fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
