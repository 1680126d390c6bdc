//! [`ProcessorService`] — sequences handlers around store persistence.

use std::sync::Arc;

use incidents_core::{
  Error, Result,
  customer::{Customer, Page, Pagination},
  gateway::PartnerGateway,
  incident::{Incident, IncidentPatch, NewIncident},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{
  projection::{CustomerCacheRefresh, CustomerReadThrough},
  registry::{EntityKind, HandlerInput, HandlerRegistry, Phase, ReadRequest, WriteEvent},
  rules::{ClosedIncidentGuard, UrgencyEscalation},
};

/// Runs incident writes and customer reads through the registered handlers.
///
/// Every write is: before-handlers → store → after-handlers. A before-handler
/// error aborts the write. After-handlers see the persisted rows; their
/// errors are logged and never fail the write.
pub struct ProcessorService<S> {
  store:    Arc<S>,
  registry: HandlerRegistry,
}

impl<S> ProcessorService<S>
where
  S: RecordStore + 'static,
{
  pub fn new(store: Arc<S>, registry: HandlerRegistry) -> Self {
    Self { store, registry }
  }

  /// A service with the standard incident rules and customer projection.
  pub fn standard<G>(store: Arc<S>, gateway: Arc<G>) -> Self
  where
    G: PartnerGateway + 'static,
  {
    let mut registry = HandlerRegistry::default();
    registry
      .register(EntityKind::Incident, Phase::BeforeCreate, UrgencyEscalation)
      .register(
        EntityKind::Incident,
        Phase::BeforeUpdate,
        ClosedIncidentGuard::new(store.clone()),
      )
      .register(
        EntityKind::Incident,
        Phase::AfterWrite,
        CustomerCacheRefresh::new(store.clone(), gateway.clone()),
      )
      .register(
        EntityKind::Customer,
        Phase::OnRead,
        CustomerReadThrough::new(gateway),
      );
    Self::new(store, registry)
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  // ── Incidents ─────────────────────────────────────────────────────────────

  pub async fn create_incidents(&self, inputs: Vec<NewIncident>) -> Result<Vec<Incident>> {
    let mut incidents: Vec<Incident> =
      inputs.into_iter().map(NewIncident::into_incident).collect();

    for handler in self.registry.handlers(EntityKind::Incident, Phase::BeforeCreate) {
      handler.handle(HandlerInput::Create(&mut incidents)).await?;
    }

    let stored = self
      .store
      .insert_incidents(incidents)
      .await
      .map_err(Error::store)?;
    tracing::info!(count = stored.len(), "created incidents");

    self.after_write(WriteEvent::Create, &stored).await;
    Ok(stored)
  }

  pub async fn update_incident(&self, id: Uuid, patch: IncidentPatch) -> Result<Incident> {
    for handler in self.registry.handlers(EntityKind::Incident, Phase::BeforeUpdate) {
      handler
        .handle(HandlerInput::Update { id, patch: &patch })
        .await?;
    }

    let updated = self
      .store
      .update_incident(id, patch)
      .await
      .map_err(Error::store)?
      .ok_or(Error::IncidentNotFound(id))?;
    tracing::info!(%id, "updated incident");

    self
      .after_write(WriteEvent::Update, std::slice::from_ref(&updated))
      .await;
    Ok(updated)
  }

  pub async fn get_incident(&self, id: Uuid) -> Result<Incident> {
    self
      .store
      .get_incident(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::IncidentNotFound(id))
  }

  pub async fn list_incidents(&self) -> Result<Vec<Incident>> {
    self.store.list_incidents().await.map_err(Error::store)
  }

  async fn after_write(&self, event: WriteEvent, incidents: &[Incident]) {
    for handler in self.registry.handlers(EntityKind::Incident, Phase::AfterWrite) {
      if let Err(e) = handler
        .handle(HandlerInput::Written { event, incidents })
        .await
      {
        tracing::error!(?event, error = %e, "after-write handler failed");
      }
    }
  }

  // ── Customers ─────────────────────────────────────────────────────────────

  /// Serve a customer read from the `OnRead` handlers, falling back to the
  /// locally cached rows when none produces a result.
  pub async fn read_customers(&self, pagination: Pagination) -> Result<Page<Customer>> {
    let mut request = ReadRequest {
      pagination,
      result: None,
    };
    for handler in self.registry.handlers(EntityKind::Customer, Phase::OnRead) {
      handler.handle(HandlerInput::Read(&mut request)).await?;
    }

    match request.result {
      Some(page) => Ok(page),
      None => {
        let rows = self
          .store
          .list_customers(pagination)
          .await
          .map_err(Error::store)?;
        Ok(Page::counted(rows))
      }
    }
  }
}
