//! Handler registration keyed by entity kind and lifecycle phase.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use incidents_core::{
  Result,
  customer::{Customer, Page, Pagination},
  incident::{Incident, IncidentPatch},
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Incident,
  Customer,
}

/// The point in an operation at which a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
  /// Before a create batch is persisted. May mutate the batch.
  BeforeCreate,
  /// Before an update is persisted. An error rejects the update.
  BeforeUpdate,
  /// After a create or update has been persisted. Errors are logged only.
  AfterWrite,
  /// Serves a read. The first handler to set a result wins.
  OnRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent {
  Create,
  Update,
}

/// A read in flight. Handlers fill in `result`; if none does, the store
/// serves the read.
#[derive(Debug, Clone)]
pub struct ReadRequest {
  pub pagination: Pagination,
  pub result:     Option<Page<Customer>>,
}

/// What a handler receives. The variant matches the phase it was
/// registered for.
#[derive(Debug)]
pub enum HandlerInput<'a> {
  Create(&'a mut [Incident]),
  Update {
    id:    Uuid,
    patch: &'a IncidentPatch,
  },
  Written {
    event:     WriteEvent,
    incidents: &'a [Incident],
  },
  Read(&'a mut ReadRequest),
}

#[async_trait]
pub trait Handler: Send + Sync {
  async fn handle(&self, input: HandlerInput<'_>) -> Result<()>;
}

/// Handlers by `(entity, phase)`, run in registration order.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
  handlers: HashMap<(EntityKind, Phase), Vec<Arc<dyn Handler>>>,
}

impl HandlerRegistry {
  pub fn register(
    &mut self,
    entity: EntityKind,
    phase: Phase,
    handler: impl Handler + 'static,
  ) -> &mut Self {
    self
      .handlers
      .entry((entity, phase))
      .or_default()
      .push(Arc::new(handler));
    self
  }

  pub fn handlers(&self, entity: EntityKind, phase: Phase) -> &[Arc<dyn Handler>] {
    self
      .handlers
      .get(&(entity, phase))
      .map(Vec::as_slice)
      .unwrap_or_default()
  }
}
