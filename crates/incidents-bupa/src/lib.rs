//! Business partner gateway for the incident processor.
//!
//! Implements [`incidents_core::gateway::PartnerGateway`] against an OData V2
//! `API_BUSINESS_PARTNER` service. The destination (base URL, service path,
//! credentials) is passed in as a [`DestinationConfig`]; nothing is registered
//! globally.

pub mod client;
pub mod config;
pub mod error;
mod wire;

pub use client::HttpPartnerGateway;
pub use config::{AuthMode, DestinationConfig};
pub use error::GatewayError;
