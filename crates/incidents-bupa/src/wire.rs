//! OData V2 wire shapes for `A_BusinessPartner` and its expansions.
//!
//! Collections arrive wrapped as `{"results": [...]}`; the top level is
//! additionally wrapped in `{"d": ...}`. A navigation property that was not
//! expanded arrives as `{"__deferred": {...}}` and decodes as empty.

use incidents_core::partner::{Address, BusinessPartner, EmailAddress, PhoneNumber};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
  pub d: Results<T>,
}

#[derive(Debug, Deserialize)]
pub struct Results<T> {
  #[serde(default = "Vec::new")]
  pub results: Vec<T>,
}

impl<T> Default for Results<T> {
  fn default() -> Self { Self { results: Vec::new() } }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPartner {
  pub business_partner:           String,
  #[serde(default)]
  pub first_name:                 Option<String>,
  #[serde(default)]
  pub last_name:                  Option<String>,
  #[serde(default)]
  pub business_partner_full_name: Option<String>,
  #[serde(rename = "to_BusinessPartnerAddress", default)]
  pub addresses:                  Results<RawAddress>,
}

#[derive(Debug, Deserialize)]
pub struct RawAddress {
  #[serde(rename = "to_EmailAddress", default)]
  pub email: Results<RawEmail>,
  #[serde(rename = "to_PhoneNumber", default)]
  pub phone: Results<RawPhone>,
}

#[derive(Debug, Deserialize)]
pub struct RawEmail {
  #[serde(rename = "EmailAddress")]
  pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPhone {
  #[serde(rename = "PhoneNumber")]
  pub phone_number: String,
}

/// The service reports absent names as empty strings.
fn non_empty(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.is_empty())
}

impl From<RawPartner> for BusinessPartner {
  fn from(raw: RawPartner) -> Self {
    BusinessPartner {
      id:         raw.business_partner,
      first_name: non_empty(raw.first_name),
      last_name:  non_empty(raw.last_name),
      name:       non_empty(raw.business_partner_full_name),
      addresses:  raw.addresses.results.into_iter().map(Address::from).collect(),
    }
  }
}

impl From<RawAddress> for Address {
  fn from(raw: RawAddress) -> Self {
    Address {
      email:        raw
        .email
        .results
        .into_iter()
        .map(|e| EmailAddress { email: e.email_address })
        .collect(),
      phone_number: raw
        .phone
        .results
        .into_iter()
        .map(|p| PhoneNumber { phone: p.phone_number })
        .collect(),
    }
  }
}

/// Decode a `{"d":{"results":[...]}}` body into domain partners.
pub fn decode_partners(body: &[u8]) -> serde_json::Result<Vec<BusinessPartner>> {
  let envelope: Envelope<RawPartner> = serde_json::from_slice(body)?;
  Ok(envelope.d.results.into_iter().map(BusinessPartner::from).collect())
}
