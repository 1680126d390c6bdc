//! Error type for `incidents-bupa`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} returned {status}")]
  Status { status: u16, url: String },

  #[error("could not decode partner response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("invalid destination config: {0}")]
  InvalidConfig(String),
}
