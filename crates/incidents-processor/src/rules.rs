//! Business rules enforced on incident writes before persistence.

use std::sync::Arc;

use async_trait::async_trait;
use incidents_core::{
  Error, Result,
  incident::{Incident, Urgency},
  store::RecordStore,
};

use crate::registry::{Handler, HandlerInput};

// ─── Urgency escalation ──────────────────────────────────────────────────────

/// Raise urgency to high for incidents whose title mentions "urgent".
pub struct UrgencyEscalation;

/// Escalate in place. Returns how many incidents were changed.
pub fn escalate_urgent(incidents: &mut [Incident]) -> usize {
  let mut escalated = 0;
  for incident in incidents.iter_mut() {
    if incident.urgency != Some(Urgency::High)
      && incident.title.to_lowercase().contains("urgent")
    {
      incident.urgency = Some(Urgency::High);
      escalated += 1;
      tracing::info!(title = %incident.title, "adjusted urgency for incident to high");
    }
  }
  escalated
}

#[async_trait]
impl Handler for UrgencyEscalation {
  async fn handle(&self, input: HandlerInput<'_>) -> Result<()> {
    if let HandlerInput::Create(incidents) = input {
      escalate_urgent(incidents);
    }
    Ok(())
  }
}

// ─── Closed incidents ────────────────────────────────────────────────────────

/// Reject updates to incidents that are already closed.
///
/// The check reads the stored row before the update is applied; a concurrent
/// close between the two is not guarded against.
pub struct ClosedIncidentGuard<S> {
  store: Arc<S>,
}

impl<S> ClosedIncidentGuard<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }
}

#[async_trait]
impl<S> Handler for ClosedIncidentGuard<S>
where
  S: RecordStore + 'static,
{
  async fn handle(&self, input: HandlerInput<'_>) -> Result<()> {
    let HandlerInput::Update { id, .. } = input else {
      return Ok(());
    };

    // A missing incident is reported by the update itself.
    let current = self.store.get_incident(id).await.map_err(Error::store)?;
    if current.is_some_and(|i| i.is_closed()) {
      tracing::info!(%id, "rejected update to closed incident");
      return Err(Error::Conflict("Can't modify a closed incident".to_string()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use incidents_core::incident::NewIncident;

  use super::*;

  fn incident(title: &str, urgency: Option<Urgency>) -> Incident {
    let mut input = NewIncident::new(title);
    input.urgency = urgency;
    input.into_incident()
  }

  #[test]
  fn urgent_title_without_urgency_is_escalated() {
    let mut batch = vec![incident("Printer is on fire, URGENT!!", None)];
    assert_eq!(escalate_urgent(&mut batch), 1);
    assert_eq!(batch[0].urgency, Some(Urgency::High));
  }

  #[test]
  fn match_is_case_insensitive_substring() {
    let mut batch = vec![
      incident("Urgently need a new laptop", Some(Urgency::Low)),
      incident("uRgEnT", Some(Urgency::Medium)),
    ];
    assert_eq!(escalate_urgent(&mut batch), 2);
    assert!(batch.iter().all(|i| i.urgency == Some(Urgency::High)));
  }

  #[test]
  fn already_high_is_left_alone() {
    let mut batch = vec![incident("urgent", Some(Urgency::High))];
    assert_eq!(escalate_urgent(&mut batch), 0);
    assert_eq!(batch[0].urgency, Some(Urgency::High));
  }

  #[test]
  fn non_urgent_title_keeps_its_urgency() {
    let mut batch = vec![
      incident("Mouse is squeaky", Some(Urgency::Low)),
      incident("Keyboard missing a key", None),
    ];
    assert_eq!(escalate_urgent(&mut batch), 0);
    assert_eq!(batch[0].urgency, Some(Urgency::Low));
    assert_eq!(batch[1].urgency, None);
  }
}
