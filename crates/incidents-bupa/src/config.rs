//! Destination settings for the remote business partner service.

use serde::Deserialize;

/// How requests to the destination are authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthMode {
  #[default]
  None,
  /// HTTP basic auth; the password may be empty.
  Basic {
    username: String,
    #[serde(default)]
    password: String,
  },
  /// Sent as the `APIKey` header, as the API sandbox expects.
  ApiKey { key: String },
}

/// Connection settings for a business partner destination.
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationConfig {
  /// Used only in log output.
  #[serde(default = "default_name")]
  pub name:         String,
  pub base_url:     String,
  #[serde(default = "default_service_path")]
  pub service_path: String,
  #[serde(default)]
  pub auth:         AuthMode,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl DestinationConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      name:         default_name(),
      base_url:     base_url.into(),
      service_path: default_service_path(),
      auth:         AuthMode::None,
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_name() -> String { "API_BUSINESS_PARTNER".to_string() }

fn default_service_path() -> String {
  "/sap/opu/odata/sap/API_BUSINESS_PARTNER".to_string()
}

fn default_timeout_secs() -> u64 { 30 }
