//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings; urgency and status as
//! their single-letter codes.

use incidents_core::incident::{Incident, Status, Urgency};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Code lists ───────────────────────────────────────────────────────────────

pub fn decode_urgency(s: &str) -> Result<Urgency> {
  Urgency::from_code(s)
    .ok_or_else(|| Error::Decode(format!("unknown urgency code: {s:?}")))
}

pub fn decode_status(s: &str) -> Result<Status> {
  Status::from_code(s)
    .ok_or_else(|| Error::Decode(format!("unknown status code: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawIncident::from_row`].
pub const INCIDENT_COLUMNS: &str = "id, title, urgency, status, customer_id";

/// Raw strings read directly from an `incidents` row.
pub struct RawIncident {
  pub id:          String,
  pub title:       String,
  pub urgency:     Option<String>,
  pub status:      Option<String>,
  pub customer_id: Option<String>,
}

impl RawIncident {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      urgency:     row.get(2)?,
      status:      row.get(3)?,
      customer_id: row.get(4)?,
    })
  }

  pub fn into_incident(self) -> Result<Incident> {
    Ok(Incident {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      urgency:     self.urgency.as_deref().map(decode_urgency).transpose()?,
      status:      self.status.as_deref().map(decode_status).transpose()?,
      customer_id: self.customer_id,
    })
  }
}
