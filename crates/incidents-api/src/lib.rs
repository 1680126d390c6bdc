//! JSON REST API for the incident processor.
//!
//! Exposes an axum [`Router`] backed by a [`ProcessorService`]. Auth, TLS
//! and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", incidents_api::api_router(service.clone()))
//! ```

pub mod customers;
pub mod error;
pub mod incidents;

use std::sync::Arc;

use axum::{Router, routing::get};
use incidents_core::store::RecordStore;
use incidents_processor::ProcessorService;

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ProcessorService<S>>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Incidents
    .route("/incidents", get(incidents::list::<S>).post(incidents::create::<S>))
    .route(
      "/incidents/{id}",
      get(incidents::get_one::<S>).patch(incidents::update::<S>),
    )
    // Customers
    .route("/customers", get(customers::list::<S>))
    .with_state(service)
}
