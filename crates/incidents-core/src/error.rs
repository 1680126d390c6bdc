//! Error types for `incidents-core`.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the processor to its callers.
#[derive(Debug, Error)]
pub enum Error {
  /// The write was rejected because it contradicts the incident's state.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("incident not found: {0}")]
  IncidentNotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("gateway error: {0}")]
  Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error as [`Error::Store`].
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  /// Box a remote service error as [`Error::Gateway`].
  pub fn gateway(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Gateway(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
