//! Customer projection from remote business partners.
//!
//! Two paths:
//!
//! - **Read-through**: customer listings are served live from the gateway
//!   and never touch the store.
//! - **Write-triggered refresh**: after incidents are persisted, each
//!   referenced customer is looked up remotely and upserted into the store.
//!   Best effort; one remote call and one local write per incident.

use std::sync::Arc;

use async_trait::async_trait;
use incidents_core::{
  Error, Result,
  customer::{Customer, Page, Pagination},
  gateway::{PartnerExpand, PartnerGateway, PartnerQuery},
  incident::Incident,
  partner::BusinessPartner,
  store::RecordStore,
};

use crate::registry::{Handler, HandlerInput};

/// Fixed page size requested from the gateway on customer reads.
pub const READ_PAGE_SIZE: usize = 100;

// ─── Mapping ─────────────────────────────────────────────────────────────────

/// The listing view of a partner: id, display name and first email.
pub fn customer_view(partner: &BusinessPartner) -> Customer {
  Customer {
    id: partner.id.clone(),
    name: partner.name.clone(),
    email: partner
      .first_address()
      .and_then(|a| a.first_email())
      .map(str::to_owned),
    ..Customer::default()
  }
}

/// The cached contact record: names plus the first address's first email and
/// phone. Fields with no source stay unset.
pub fn customer_contact(id: &str, partner: &BusinessPartner) -> Customer {
  let address = partner.first_address();
  Customer {
    id:         id.to_owned(),
    first_name: partner.first_name.clone(),
    last_name:  partner.last_name.clone(),
    name:       None,
    email:      address.and_then(|a| a.first_email()).map(str::to_owned),
    phone:      address.and_then(|a| a.first_phone()).map(str::to_owned),
  }
}

// ─── Read-through ────────────────────────────────────────────────────────────

/// Serves customer reads from the remote gateway.
pub struct CustomerReadThrough<G> {
  gateway: Arc<G>,
}

impl<G: PartnerGateway> CustomerReadThrough<G> {
  pub fn new(gateway: Arc<G>) -> Self { Self { gateway } }

  /// Fetch one page starting at the caller's offset. The caller's limit is
  /// not forwarded; the page size is always [`READ_PAGE_SIZE`].
  ///
  /// `total` is the size of the returned page, not the remote count.
  pub async fn read(&self, pagination: Pagination) -> Result<Page<Customer>> {
    tracing::info!(offset = pagination.offset, "delegating customer read to partner service");

    let query = PartnerQuery {
      id:     None,
      expand: PartnerExpand::AddressEmail,
      limit:  READ_PAGE_SIZE,
      offset: pagination.offset,
    };
    let partners = self.gateway.find(&query).await.map_err(Error::gateway)?;
    Ok(Page::counted(partners.iter().map(customer_view).collect()))
  }
}

#[async_trait]
impl<G> Handler for CustomerReadThrough<G>
where
  G: PartnerGateway + 'static,
{
  async fn handle(&self, input: HandlerInput<'_>) -> Result<()> {
    if let HandlerInput::Read(request) = input
      && request.result.is_none()
    {
      request.result = Some(self.read(request.pagination).await?);
    }
    Ok(())
  }
}

// ─── Write-triggered refresh ─────────────────────────────────────────────────

/// Per-batch outcome of a cache refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
  pub refreshed: usize,
  /// Incidents whose customer is unknown to the remote service.
  pub missing:   usize,
  pub failed:    usize,
}

/// Refreshes cached customers after incidents are written.
pub struct CustomerCacheRefresh<S, G> {
  store:   Arc<S>,
  gateway: Arc<G>,
}

impl<S, G> CustomerCacheRefresh<S, G>
where
  S: RecordStore,
  G: PartnerGateway,
{
  pub fn new(store: Arc<S>, gateway: Arc<G>) -> Self { Self { store, gateway } }

  /// Refresh the customer of every incident that has one. A failure for one
  /// incident is logged and does not stop the rest of the batch.
  pub async fn refresh(&self, incidents: &[Incident]) -> RefreshReport {
    let mut report = RefreshReport::default();

    for customer_id in incidents.iter().filter_map(|i| i.customer_id.as_deref()) {
      tracing::info!(%customer_id, "refreshing customer cache");
      match self.refresh_one(customer_id).await {
        Ok(true) => report.refreshed += 1,
        Ok(false) => {
          tracing::debug!(%customer_id, "no matching business partner; skipped");
          report.missing += 1;
        }
        Err(e) => {
          tracing::warn!(%customer_id, error = %e, "customer cache refresh failed");
          report.failed += 1;
        }
      }
    }
    report
  }

  /// Returns `false` if the partner does not exist remotely.
  async fn refresh_one(&self, customer_id: &str) -> Result<bool> {
    let Some(partner) = self
      .gateway
      .find_one(customer_id, PartnerExpand::AddressAll)
      .await
      .map_err(Error::gateway)?
    else {
      return Ok(false);
    };

    self
      .store
      .upsert_customer(customer_contact(customer_id, &partner))
      .await
      .map_err(Error::store)?;
    Ok(true)
  }
}

#[async_trait]
impl<S, G> Handler for CustomerCacheRefresh<S, G>
where
  S: RecordStore + 'static,
  G: PartnerGateway + 'static,
{
  async fn handle(&self, input: HandlerInput<'_>) -> Result<()> {
    if let HandlerInput::Written { incidents, .. } = input {
      let report = self.refresh(incidents).await;
      tracing::debug!(?report, "customer cache refresh finished");
    }
    Ok(())
  }
}
