//! The `PartnerGateway` trait and its query type.
//!
//! Implemented by remote adapters (e.g. `incidents-bupa`). Retries, backoff
//! and credentials are the implementation's concern.

use std::future::Future;

use crate::partner::BusinessPartner;

/// Which nested collections to expand on each partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerExpand {
  /// Addresses with their email entries.
  AddressEmail,
  /// Addresses with email and phone entries.
  AddressAll,
}

/// Parameters for [`PartnerGateway::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerQuery {
  /// Restrict to the partner with this id.
  pub id:     Option<String>,
  pub expand: PartnerExpand,
  pub limit:  usize,
  pub offset: usize,
}

impl PartnerQuery {
  /// A single-partner lookup by id.
  pub fn by_id(id: impl Into<String>, expand: PartnerExpand) -> Self {
    Self {
      id: Some(id.into()),
      expand,
      limit: 1,
      offset: 0,
    }
  }
}

/// Abstraction over the remote business partner service.
pub trait PartnerGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch one page of partners matching `query`.
  fn find<'a>(
    &'a self,
    query: &'a PartnerQuery,
  ) -> impl Future<Output = Result<Vec<BusinessPartner>, Self::Error>> + Send + 'a;

  /// Fetch a single partner by id. Returns `None` if the remote service has
  /// no such partner.
  fn find_one<'a>(
    &'a self,
    id: &'a str,
    expand: PartnerExpand,
  ) -> impl Future<Output = Result<Option<BusinessPartner>, Self::Error>> + Send + 'a;
}
