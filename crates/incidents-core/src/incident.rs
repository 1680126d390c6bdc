//! Incident records and the partial-update shape applied to them.
//!
//! Urgency and status travel as the single-letter codes used by the incident
//! code lists (`H`/`M`/`L` and `N`/`A`/`I`/`H`/`R`/`C`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Code lists ──────────────────────────────────────────────────────────────

/// How quickly an incident needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
  #[serde(rename = "H")]
  High,
  #[serde(rename = "M")]
  Medium,
  #[serde(rename = "L")]
  Low,
}

impl Urgency {
  pub fn code(self) -> &'static str {
    match self {
      Self::High => "H",
      Self::Medium => "M",
      Self::Low => "L",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "H" => Some(Self::High),
      "M" => Some(Self::Medium),
      "L" => Some(Self::Low),
      _ => None,
    }
  }
}

/// Where an incident is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  #[serde(rename = "N")]
  New,
  #[serde(rename = "A")]
  Assigned,
  #[serde(rename = "I")]
  InProcess,
  #[serde(rename = "H")]
  OnHold,
  #[serde(rename = "R")]
  Resolved,
  #[serde(rename = "C")]
  Closed,
}

impl Status {
  pub fn code(self) -> &'static str {
    match self {
      Self::New => "N",
      Self::Assigned => "A",
      Self::InProcess => "I",
      Self::OnHold => "H",
      Self::Resolved => "R",
      Self::Closed => "C",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "N" => Some(Self::New),
      "A" => Some(Self::Assigned),
      "I" => Some(Self::InProcess),
      "H" => Some(Self::OnHold),
      "R" => Some(Self::Resolved),
      "C" => Some(Self::Closed),
      _ => None,
    }
  }
}

// ─── Incident ────────────────────────────────────────────────────────────────

/// A support incident as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
  pub id:          Uuid,
  pub title:       String,
  pub urgency:     Option<Urgency>,
  pub status:      Option<Status>,
  /// Business partner id of the reporting customer. Not checked against the
  /// remote system.
  pub customer_id: Option<String>,
}

impl Incident {
  pub fn is_closed(&self) -> bool { self.status == Some(Status::Closed) }
}

/// Input to an incident create. The id is assigned before any handler runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIncident {
  pub title:       String,
  #[serde(default)]
  pub urgency:     Option<Urgency>,
  #[serde(default)]
  pub status:      Option<Status>,
  #[serde(default)]
  pub customer_id: Option<String>,
}

impl NewIncident {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Self::default()
    }
  }

  /// Assign a fresh id.
  pub fn into_incident(self) -> Incident {
    Incident {
      id:          Uuid::new_v4(),
      title:       self.title,
      urgency:     self.urgency,
      status:      self.status,
      customer_id: self.customer_id,
    }
  }
}

// ─── IncidentPatch ───────────────────────────────────────────────────────────

/// A partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentPatch {
  #[serde(default)]
  pub title:       Option<String>,
  #[serde(default)]
  pub urgency:     Option<Urgency>,
  #[serde(default)]
  pub status:      Option<Status>,
  #[serde(default)]
  pub customer_id: Option<String>,
}

impl IncidentPatch {
  pub fn apply(&self, incident: &mut Incident) {
    if let Some(title) = &self.title {
      incident.title = title.clone();
    }
    if let Some(urgency) = self.urgency {
      incident.urgency = Some(urgency);
    }
    if let Some(status) = self.status {
      incident.status = Some(status);
    }
    if let Some(customer_id) = &self.customer_id {
      incident.customer_id = Some(customer_id.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_round_trip_through_serde() {
    let json = serde_json::to_string(&Status::Closed).unwrap();
    assert_eq!(json, "\"C\"");
    let urgency: Urgency = serde_json::from_str("\"H\"").unwrap();
    assert_eq!(urgency, Urgency::High);
    assert_eq!(Status::from_code("I"), Some(Status::InProcess));
    assert_eq!(Urgency::from_code("X"), None);
  }

  #[test]
  fn patch_only_touches_present_fields() {
    let mut incident = NewIncident::new("Printer jam").into_incident();
    incident.urgency = Some(Urgency::Low);

    IncidentPatch {
      status: Some(Status::Assigned),
      ..IncidentPatch::default()
    }
    .apply(&mut incident);

    assert_eq!(incident.title, "Printer jam");
    assert_eq!(incident.urgency, Some(Urgency::Low));
    assert_eq!(incident.status, Some(Status::Assigned));
  }
}
