//! Business partner records as seen through the remote gateway.
//!
//! These are read-only to the processor. Only the fields the customer
//! projection needs are modelled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPartner {
  pub id:         String,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub name:       Option<String>,
  /// Ordered as returned by the remote service.
  #[serde(default)]
  pub addresses:  Vec<Address>,
}

impl BusinessPartner {
  pub fn first_address(&self) -> Option<&Address> { self.addresses.first() }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  #[serde(default)]
  pub email:        Vec<EmailAddress>,
  #[serde(default)]
  pub phone_number: Vec<PhoneNumber>,
}

impl Address {
  pub fn first_email(&self) -> Option<&str> {
    self.email.first().map(|e| e.email.as_str())
  }

  pub fn first_phone(&self) -> Option<&str> {
    self.phone_number.first().map(|p| p.phone.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
  pub phone: String,
}
