//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `incidents-store-sqlite`). The processor depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  customer::{Customer, Pagination},
  incident::{Incident, IncidentPatch},
};

/// Abstraction over the local record store for incidents and cached
/// customers.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Incidents ─────────────────────────────────────────────────────────

  /// Persist a batch of new incidents and return them as stored.
  fn insert_incidents(
    &self,
    incidents: Vec<Incident>,
  ) -> impl Future<Output = Result<Vec<Incident>, Self::Error>> + Send + '_;

  /// Retrieve an incident by id. Returns `None` if not found.
  fn get_incident(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Incident>, Self::Error>> + Send + '_;

  /// Apply `patch` to the stored incident and return the result. Returns
  /// `None` if the incident does not exist.
  fn update_incident(
    &self,
    id: Uuid,
    patch: IncidentPatch,
  ) -> impl Future<Output = Result<Option<Incident>, Self::Error>> + Send + '_;

  fn list_incidents(
    &self,
  ) -> impl Future<Output = Result<Vec<Incident>, Self::Error>> + Send + '_;

  // ── Customers ─────────────────────────────────────────────────────────

  fn get_customer<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + 'a;

  /// Insert `customer`, or fully replace the stored row with the same id.
  fn upsert_customer(
    &self,
    customer: Customer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// List cached customers ordered by id.
  fn list_customers(
    &self,
    page: Pagination,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;
}
